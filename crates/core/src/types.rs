//! Identity types
//!
//! - [`ClientId`]: stable identity of one racing client
//! - [`TableRef`]: fully qualified location of the counter table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of the single counter row.
pub const COUNTER_ROW_ID: i32 = 0;

/// Value the counter is seeded with, and the first value every worker expects.
pub const INITIAL_VALUE: i64 = 1;

/// Identifier of a client worker
///
/// Ids are assigned `1..=client_count` by the orchestrator and never reused
/// within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(u32);

impl ClientId {
    /// Wrap a raw id
    pub const fn new(id: u32) -> Self {
        ClientId(id)
    }

    /// Get the raw id
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ClientId {
    fn from(id: u32) -> Self {
        ClientId(id)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyspace-qualified table holding the counter
///
/// # Examples
///
/// ```
/// use castest_core::TableRef;
///
/// let table = TableRef::new("castest", "counter");
/// assert_eq!(table.to_string(), "castest.counter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    /// Keyspace name
    pub keyspace: String,
    /// Table name within the keyspace
    pub table: String,
}

impl TableRef {
    /// Create a table reference
    pub fn new(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.keyspace, self.table)
    }
}
