//! Store contract
//!
//! The harness never touches the counter directly. Everything goes through
//! a [`CasSession`] opened by a [`Connector`]; the store is the sole arbiter
//! of whether an update applied.
//!
//! Implementations must provide linearizable single-row CAS. The harness
//! assumes nothing richer than that: no transactions, no batching.

use crate::error::Result;
use crate::statement::Statement;
use crate::types::TableRef;

/// Answer to a conditional update that reached the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasResult {
    /// Whether the update was applied
    pub applied: bool,
    /// Current counter value as seen by the store
    ///
    /// When `applied` is false this is the value that made the condition fail.
    /// When `applied` is true it is the value the update replaced.
    pub actual: i64,
}

impl CasResult {
    /// The update was applied over `previous`
    pub fn applied(previous: i64) -> Self {
        Self {
            applied: true,
            actual: previous,
        }
    }

    /// The update was rejected; the counter currently holds `actual`
    pub fn rejected(actual: i64) -> Self {
        Self {
            applied: false,
            actual,
        }
    }
}

/// A live session against the store
///
/// Dropping the session closes it.
pub trait CasSession {
    /// Execute a schema or seed statement
    fn execute(&self, statement: &Statement) -> Result<()>;

    /// `UPDATE <table> SET value = new_value WHERE id = 0 IF value = expected`
    ///
    /// Returns `Err` when the outcome is unknown (timeout, transport failure)
    /// or the target does not exist.
    fn compare_and_swap(&self, table: &TableRef, expected: i64, new_value: i64)
        -> Result<CasResult>;
}

/// Opens sessions against one store endpoint
pub trait Connector {
    /// Session type produced by this connector
    type Session: CasSession;

    /// Endpoint description, used in diagnostics
    fn endpoint(&self) -> &str;

    /// Open a new session
    fn connect(&self) -> Result<Self::Session>;
}

impl<S: CasSession + ?Sized> CasSession for Box<S> {
    fn execute(&self, statement: &Statement) -> Result<()> {
        (**self).execute(statement)
    }

    fn compare_and_swap(
        &self,
        table: &TableRef,
        expected: i64,
        new_value: i64,
    ) -> Result<CasResult> {
        (**self).compare_and_swap(table, expected, new_value)
    }
}
