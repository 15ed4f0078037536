//! Store backends for castest
//!
//! - [`MemoryStore`]: in-process store with linearizable single-row CAS,
//!   keyspace/table catalog, applied-CAS history and fault injection
//! - [`ScriptedSession`]: session replaying a fixed sequence of CAS answers,
//!   for driving a worker through exact transitions

#![warn(missing_docs)]
#![warn(clippy::all)]

mod catalog;
pub mod fault;
pub mod memory;
pub mod scripted;

pub use catalog::AppliedCas;
pub use fault::FaultPlan;
pub use memory::{MemoryConnector, MemorySession, MemoryStore};
pub use scripted::{Scripted, ScriptedSession};
