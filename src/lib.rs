//! # castest
//!
//! Concurrent compare-and-swap exerciser for a replicated counter.
//!
//! N clients race to increment one counter row through CAS. Every attempt is
//! reported as `<client> <value> <status>` with status `success`, `fail` or
//! `error`, so that the store's CAS guarantees can be checked from the
//! outside.
//!
//! ## Quick Start
//!
//! ```
//! use castest::prelude::*;
//!
//! let store = MemoryStore::new();
//! let config = HarnessConfig {
//!     client_count: 4,
//!     max_value: 100,
//!     ..HarnessConfig::default()
//! };
//!
//! let orchestrator = Orchestrator::new(store.connector("mem", FaultPlan::none()), config)?;
//! let mut out = Vec::new();
//! let summary = orchestrator.run(&mut out)?;
//!
//! // Every increment from 1 to 100 was applied exactly once.
//! assert_eq!(summary.total().success, 100);
//! # Ok::<(), castest::Error>(())
//! ```
//!
//! ## Crates
//!
//! - [`castest_core`]: events, errors and the [`CasSession`] store contract
//! - [`castest_store`]: in-process store and scripted test sessions
//! - [`castest_harness`]: workers, aggregator, orchestrator, bootstrap

#![warn(missing_docs)]

pub mod prelude;

pub use castest_core::{
    duration, AttemptStatus, CasResult, CasSession, ClientId, Connector, Error, Result,
    ResultEvent, Statement, StreamItem, TableRef, COUNTER_ROW_ID, INITIAL_VALUE,
};
pub use castest_harness::{
    bootstrap, schema_statements, Aggregator, AttemptOutcome, ClientTally, ClientWorker,
    HarnessConfig, Orchestrator, RunSummary, WorkerState, CHANNEL_SLOTS_PER_CLIENT,
};
pub use castest_store::{
    AppliedCas, FaultPlan, MemoryConnector, MemorySession, MemoryStore, Scripted,
    ScriptedSession,
};
