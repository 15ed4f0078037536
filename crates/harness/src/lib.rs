//! CAS exerciser harness
//!
//! Runs N client workers that race to increment one counter through
//! compare-and-swap, and merges their outcomes into a single stream.
//!
//! ## Flow
//!
//! ```text
//! Orchestrator
//!   1. bootstrap()        - schema + seed on a dedicated session, then close it
//!   2. connect x N        - one session per worker, before any worker starts
//!   3. spawn workers      - ClientWorker::run on its own thread
//!   4. Aggregator::drain  - print events until N completion signals arrive
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregator;
pub mod bootstrap;
pub mod config;
pub mod orchestrator;
pub mod worker;

pub use aggregator::{Aggregator, ClientTally, RunSummary};
pub use bootstrap::{bootstrap, schema_statements};
pub use config::HarnessConfig;
pub use orchestrator::{Orchestrator, CHANNEL_SLOTS_PER_CLIENT};
pub use worker::{AttemptOutcome, ClientWorker, WorkerState};
