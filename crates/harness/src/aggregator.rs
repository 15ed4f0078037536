//! Result aggregator
//!
//! Single consumer of the shared event stream. Prints every result event in
//! arrival order and counts completion signals; returns once every worker has
//! signalled completion.
//!
//! Completion signals are never printed.

use castest_core::{AttemptStatus, ClientId, Error, Result, ResultEvent, StreamItem};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::sync::mpsc::Receiver;
use tracing::{debug, error};

/// Per-client attempt counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientTally {
    /// Applied attempts
    pub success: u64,
    /// Rejected attempts
    pub fail: u64,
    /// Errored attempts
    pub error: u64,
}

impl ClientTally {
    /// Total attempts
    pub fn attempts(&self) -> u64 {
        self.success + self.fail + self.error
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Counts per client, including clients that made no attempt
    pub per_client: BTreeMap<ClientId, ClientTally>,
    /// Events printed, in arrival order
    pub events: u64,
}

impl RunSummary {
    fn record(&mut self, event: &ResultEvent) {
        let tally = self.per_client.entry(event.client_id).or_default();
        match event.status {
            AttemptStatus::Success => tally.success += 1,
            AttemptStatus::Fail => tally.fail += 1,
            AttemptStatus::Error => tally.error += 1,
        }
        self.events += 1;
    }

    /// Sum over all clients
    pub fn total(&self) -> ClientTally {
        self.per_client
            .values()
            .fold(ClientTally::default(), |acc, t| ClientTally {
                success: acc.success + t.success,
                fail: acc.fail + t.fail,
                error: acc.error + t.error,
            })
    }

    /// Number of clients that signalled completion
    pub fn clients(&self) -> usize {
        self.per_client.len()
    }
}

/// Drains the event stream into a writer
pub struct Aggregator<W: Write> {
    out: W,
    summary: RunSummary,
}

impl<W: Write> Aggregator<W> {
    /// Aggregator printing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: RunSummary::default(),
        }
    }

    /// Consume the stream until `workers` completion signals have arrived
    ///
    /// # Errors
    ///
    /// - `Io` if writing to the output fails
    /// - `Internal` if a worker signals completion twice, or every sender
    ///   disconnects while workers are still outstanding (a worker died)
    pub fn drain(mut self, events: &Receiver<StreamItem>, workers: usize) -> Result<RunSummary> {
        let mut finished = BTreeSet::new();

        while finished.len() < workers {
            match events.recv() {
                Ok(StreamItem::Event(event)) => {
                    writeln!(self.out, "{}", event)?;
                    self.summary.record(&event);
                }
                Ok(StreamItem::Done(client)) => {
                    if !finished.insert(client) {
                        return Err(Error::Internal(format!(
                            "client {} signalled completion twice",
                            client
                        )));
                    }
                    self.summary.per_client.entry(client).or_default();
                    debug!(
                        %client,
                        remaining = workers - finished.len(),
                        "client completed"
                    );
                }
                Err(_) => {
                    let remaining = workers - finished.len();
                    error!(remaining, "event stream closed early");
                    return Err(Error::Internal(format!(
                        "event stream closed with {} of {} clients still running",
                        remaining, workers
                    )));
                }
            }
        }

        self.out.flush()?;
        Ok(self.summary)
    }
}
