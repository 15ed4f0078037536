//! Events flowing from workers to the aggregator
//!
//! Every CAS attempt produces exactly one [`ResultEvent`]. A worker that has
//! driven its expected value past the maximum sends one [`StreamItem::Done`]
//! on the same stream and nothing after it.

use crate::types::ClientId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome class of one CAS attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    /// The store applied the update
    Success,
    /// The store rejected the update because the expected value was stale
    Fail,
    /// The call itself failed; whether it applied is unknown
    Error,
}

impl AttemptStatus {
    /// Canonical lowercase name used in the output format
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Success => "success",
            AttemptStatus::Fail => "fail",
            AttemptStatus::Error => "error",
        }
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported outcome of a single CAS attempt
///
/// Displays as `<client> <attempted value> <status>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultEvent {
    /// Client that made the attempt
    pub client_id: ClientId,
    /// Expected value passed to CAS
    pub attempted_value: i64,
    /// What happened
    pub status: AttemptStatus,
}

impl ResultEvent {
    /// Create a result event
    pub fn new(client_id: ClientId, attempted_value: i64, status: AttemptStatus) -> Self {
        Self {
            client_id,
            attempted_value,
            status,
        }
    }
}

impl fmt::Display for ResultEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.client_id, self.attempted_value, self.status)
    }
}

/// Item on the shared worker -> aggregator stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamItem {
    /// One attempt outcome
    Event(ResultEvent),
    /// Completion signal: the named worker will send nothing further
    Done(ClientId),
}

impl From<ResultEvent> for StreamItem {
    fn from(event: ResultEvent) -> Self {
        StreamItem::Event(event)
    }
}
