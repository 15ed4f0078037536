//! Convenient imports for castest.
//!
//! ```
//! use castest::prelude::*;
//! ```

pub use crate::{
    AttemptStatus, CasSession, ClientId, Connector, Error, FaultPlan, HarnessConfig,
    MemoryStore, Orchestrator, Result, ResultEvent, RunSummary, TableRef,
};
