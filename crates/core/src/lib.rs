//! Core types for the castest CAS exerciser
//!
//! This crate defines the vocabulary shared by every other crate:
//! - [`ClientId`] and [`TableRef`]: who is racing, and on which counter
//! - [`ResultEvent`] / [`StreamItem`]: what workers report to the aggregator
//! - [`CasSession`] / [`Connector`]: the store contract the harness is a client of
//! - [`Statement`]: the schema statements executed during bootstrap
//! - [`Error`]: the error type for all of the above
//! - [`duration`]: duration parsing shared by flags and config files

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod duration;
pub mod error;
pub mod event;
pub mod session;
pub mod statement;
pub mod types;

pub use error::{Error, Result};
pub use event::{AttemptStatus, ResultEvent, StreamItem};
pub use session::{CasResult, CasSession, Connector};
pub use statement::Statement;
pub use types::{ClientId, TableRef, COUNTER_ROW_ID, INITIAL_VALUE};
