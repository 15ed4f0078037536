//! Client worker: the CAS retry state machine
//!
//! ## States
//!
//! ```text
//! Running(v) --CAS(v, v+1)--> Applied      => Running(v + 1)
//!                         --> Rejected(a)  => Running(a)
//!                         --> Errored      => Running(v)
//! Running(v) with v > max_value            => Done
//! ```
//!
//! An error leaves the outcome unknown, so the worker retries the same
//! expected value. If the lost attempt had in fact applied, the retry is
//! rejected and the worker resynchronises from the returned value.
//!
//! There is no retry bound: a store that never answers keeps the worker
//! at the same value forever.

use castest_core::{
    AttemptStatus, CasResult, CasSession, ClientId, Result, ResultEvent, StreamItem, TableRef,
    INITIAL_VALUE,
};
use std::sync::mpsc::SyncSender;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Classified result of one CAS call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The store applied the update
    Applied,
    /// The store rejected the update; the counter holds `actual`
    Rejected {
        /// Counter value reported by the store
        actual: i64,
    },
    /// The call failed; the effect is unknown
    Errored,
}

impl AttemptOutcome {
    /// Classify a CAS call result
    pub fn classify(result: &Result<CasResult>) -> Self {
        match result {
            Err(_) => AttemptOutcome::Errored,
            Ok(cas) if cas.applied => AttemptOutcome::Applied,
            Ok(cas) => AttemptOutcome::Rejected { actual: cas.actual },
        }
    }

    /// Status reported for this outcome
    pub fn status(&self) -> AttemptStatus {
        match self {
            AttemptOutcome::Applied => AttemptStatus::Success,
            AttemptOutcome::Rejected { .. } => AttemptStatus::Fail,
            AttemptOutcome::Errored => AttemptStatus::Error,
        }
    }

    /// Value to expect on the next attempt after attempting `attempted`
    pub fn next_expected(&self, attempted: i64) -> i64 {
        match self {
            AttemptOutcome::Applied => attempted + 1,
            AttemptOutcome::Rejected { actual } => *actual,
            AttemptOutcome::Errored => attempted,
        }
    }
}

/// Worker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Still incrementing; `expected` is the value the worker believes the counter holds
    Running {
        /// Value passed as the CAS condition on the next attempt
        expected: i64,
    },
    /// Expected value passed the maximum; nothing more to do
    Done,
}

impl WorkerState {
    /// State for a worker expecting `expected`, bounded by `max_value`
    pub fn at(expected: i64, max_value: i64) -> Self {
        if expected > max_value {
            WorkerState::Done
        } else {
            WorkerState::Running { expected }
        }
    }

    /// Apply the outcome of an attempt made in this state
    ///
    /// `Done` is absorbing.
    pub fn advance(self, outcome: AttemptOutcome, max_value: i64) -> Self {
        match self {
            WorkerState::Running { expected } => {
                WorkerState::at(outcome.next_expected(expected), max_value)
            }
            WorkerState::Done => WorkerState::Done,
        }
    }

    /// Check if the worker has finished
    pub fn is_done(&self) -> bool {
        matches!(self, WorkerState::Done)
    }
}

/// One racing client
///
/// Owned and mutated only by the thread running it.
#[derive(Debug, Clone)]
pub struct ClientWorker {
    id: ClientId,
    max_value: i64,
    delay: Duration,
    state: WorkerState,
    attempts: u64,
}

impl ClientWorker {
    /// Create a worker expecting the seeded counter value
    pub fn new(id: ClientId, max_value: i64, delay: Duration) -> Self {
        Self {
            id,
            max_value,
            delay,
            state: WorkerState::at(INITIAL_VALUE, max_value),
            attempts: 0,
        }
    }

    /// Client id
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Current state
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Number of attempts made so far
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Make one CAS attempt
    ///
    /// Returns `None` without calling the store once the worker is done.
    pub fn step<S>(&mut self, session: &S, table: &TableRef) -> Option<ResultEvent>
    where
        S: CasSession + ?Sized,
    {
        let expected = match self.state {
            WorkerState::Running { expected } => expected,
            WorkerState::Done => return None,
        };

        let result = session.compare_and_swap(table, expected, expected + 1);
        if let Err(e) = &result {
            trace!(client = %self.id, expected, error = %e, "cas error");
        }

        let outcome = AttemptOutcome::classify(&result);
        self.state = self.state.advance(outcome, self.max_value);
        self.attempts += 1;
        Some(ResultEvent::new(self.id, expected, outcome.status()))
    }

    /// Run to completion, sending every event and then one completion signal
    ///
    /// Returns the number of attempts made. If the receiving side goes away
    /// the worker stops early; there is nobody left to report to.
    pub fn run<S>(mut self, session: &S, table: &TableRef, events: &SyncSender<StreamItem>) -> u64
    where
        S: CasSession + ?Sized,
    {
        debug!(client = %self.id, max_value = self.max_value, "worker started");

        while let Some(event) = self.step(session, table) {
            if events.send(StreamItem::Event(event)).is_err() {
                warn!(client = %self.id, "event stream closed, stopping worker");
                return self.attempts;
            }
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }

        if events.send(StreamItem::Done(self.id)).is_err() {
            warn!(client = %self.id, "event stream closed before completion signal");
        }
        debug!(client = %self.id, attempts = self.attempts, "worker finished");
        self.attempts
    }
}
