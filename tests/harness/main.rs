//! Harness Integration Tests
//!
//! End-to-end behaviour of workers, aggregator and orchestrator against
//! scripted sessions and the in-memory store.
//!
//! ## Modules
//!
//! - `transitions`: exact event sequences for scripted CAS answers
//! - `aggregation`: completion counting across real worker threads
//! - `linearizability`: applied-CAS history vs reported successes
//! - `properties`: termination under arbitrary contention and faults

mod common;

pub mod aggregation;
pub mod linearizability;
pub mod properties;
pub mod transitions;

pub use common::*;
