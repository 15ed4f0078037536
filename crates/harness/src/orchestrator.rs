//! Run orchestration
//!
//! ## Run Sequence
//!
//! ```text
//! 1. validate config
//! 2. bootstrap()                  - schema + seed, session closed
//! 3. connect() x client_count     - any failure aborts before a worker starts
//! 4. spawn castest-client-<id>    - ClientWorker::run per thread
//! 5. Aggregator::drain            - on the calling thread
//! 6. join workers
//! ```
//!
//! The shared stream is a bounded channel with
//! `client_count * CHANNEL_SLOTS_PER_CLIENT` slots, so a slow writer on the
//! output side delays workers instead of growing memory.

use crate::aggregator::{Aggregator, RunSummary};
use crate::bootstrap::bootstrap;
use crate::config::HarnessConfig;
use crate::worker::ClientWorker;
use castest_core::{ClientId, Connector, Error, Result};
use std::io::Write;
use std::sync::mpsc::sync_channel;
use std::thread;
use tracing::{error, info};

/// Stream slots reserved per client
pub const CHANNEL_SLOTS_PER_CLIENT: usize = 64;

/// Drives one complete run against a store
pub struct Orchestrator<C: Connector> {
    connector: C,
    config: HarnessConfig,
}

impl<C> Orchestrator<C>
where
    C: Connector,
    C::Session: Send + 'static,
{
    /// Create an orchestrator, rejecting unusable configurations
    pub fn new(connector: C, config: HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { connector, config })
    }

    /// Configuration in use
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Bootstrap, race all clients to completion, print every event to `out`
    ///
    /// Bootstrap and connection failures are returned before any event is
    /// written. CAS failures never fail the run; they are `error` events.
    pub fn run<W: Write>(&self, out: W) -> Result<RunSummary> {
        let config = &self.config;
        bootstrap(&self.connector, config)?;
        if !config.has_work() {
            info!(
                max_value = config.max_value,
                "nothing to increment, clients will only signal completion"
            );
        }

        let sessions = (1..=config.client_count)
            .map(|id| self.connector.connect().map(|session| (ClientId::new(id), session)))
            .collect::<Result<Vec<_>>>()?;

        let table = config.table_ref();
        let workers = sessions.len();
        let (events_tx, events_rx) = sync_channel(workers * CHANNEL_SLOTS_PER_CLIENT);

        info!(
            clients = workers,
            max_value = config.max_value,
            delay = ?config.delay,
            %table,
            "starting clients"
        );

        let mut handles = Vec::with_capacity(workers);
        for (id, session) in sessions {
            let worker = ClientWorker::new(id, config.max_value, config.delay);
            let events = events_tx.clone();
            let table = table.clone();
            let handle = thread::Builder::new()
                .name(format!("castest-client-{}", id))
                .spawn(move || worker.run(&session, &table, &events))?;
            handles.push((id, handle));
        }
        // Only workers hold senders now; if they all die the aggregator sees a disconnect.
        drop(events_tx);

        let drained = Aggregator::new(out).drain(&events_rx, workers);
        // Unblock any worker still sending if the aggregator bailed out.
        drop(events_rx);

        let mut attempts = 0u64;
        for (id, handle) in handles {
            match handle.join() {
                Ok(n) => attempts += n,
                Err(_) => {
                    error!(client = %id, "worker panicked");
                    if drained.is_ok() {
                        return Err(Error::Internal(format!("client {} panicked", id)));
                    }
                }
            }
        }

        let summary = drained?;
        let total = summary.total();
        info!(
            attempts,
            success = total.success,
            fail = total.fail,
            error = total.error,
            "run complete"
        );
        Ok(summary)
    }
}
