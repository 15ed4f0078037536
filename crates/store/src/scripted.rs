//! Scripted session
//!
//! Replays a fixed list of CAS answers, then falls back to a default answer
//! once the script runs out. Every call is recorded so tests can check exactly
//! which `(expected, new_value)` pairs a worker sent.

use castest_core::{CasResult, CasSession, Error, Result, Statement, TableRef};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// One scripted CAS answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scripted {
    /// Apply the update (reports the expected value as the previous one)
    Applied,
    /// Reject the update, reporting the given current value
    Rejected(i64),
    /// Fail with a timeout
    TimedOut,
    /// Fail with an unavailable error
    Unavailable,
}

impl Scripted {
    fn answer(self, expected: i64) -> Result<CasResult> {
        match self {
            Scripted::Applied => Ok(CasResult::applied(expected)),
            Scripted::Rejected(actual) => Ok(CasResult::rejected(actual)),
            Scripted::TimedOut => Err(Error::Timeout(crate::fault::INJECTED_TIMEOUT)),
            Scripted::Unavailable => Err(Error::Unavailable("scripted".into())),
        }
    }
}

/// Session answering CAS calls from a script
///
/// # Example
///
/// ```
/// use castest_core::{CasSession, TableRef};
/// use castest_store::{Scripted, ScriptedSession};
///
/// let session = ScriptedSession::new([Scripted::Rejected(7)]);
/// let table = TableRef::new("ks", "t");
///
/// assert!(!session.compare_and_swap(&table, 1, 2).unwrap().applied);
/// assert!(session.compare_and_swap(&table, 7, 8).unwrap().applied);
/// assert_eq!(session.calls(), vec![(1, 2), (7, 8)]);
/// ```
#[derive(Debug)]
pub struct ScriptedSession {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Scripted,
    calls: Mutex<Vec<(i64, i64)>>,
    statements: Mutex<Vec<Statement>>,
}

impl ScriptedSession {
    /// Script followed by [`Scripted::Applied`] forever
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self::with_fallback(script, Scripted::Applied)
    }

    /// Session that applies every CAS
    pub fn always_apply() -> Self {
        Self::new(std::iter::empty())
    }

    /// Script followed by `fallback` forever
    pub fn with_fallback(script: impl IntoIterator<Item = Scripted>, fallback: Scripted) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: Mutex::new(Vec::new()),
            statements: Mutex::new(Vec::new()),
        }
    }

    /// `(expected, new_value)` of every CAS call so far
    pub fn calls(&self) -> Vec<(i64, i64)> {
        self.calls.lock().clone()
    }

    /// Statements executed so far
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().clone()
    }
}

impl CasSession for ScriptedSession {
    fn execute(&self, statement: &Statement) -> Result<()> {
        self.statements.lock().push(statement.clone());
        Ok(())
    }

    fn compare_and_swap(
        &self,
        _table: &TableRef,
        expected: i64,
        new_value: i64,
    ) -> Result<CasResult> {
        self.calls.lock().push((expected, new_value));
        let step = self.script.lock().pop_front().unwrap_or(self.fallback);
        step.answer(expected)
    }
}
