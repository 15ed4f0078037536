//! Error types for castest.
//!
//! A single error enum covers both tiers the harness distinguishes:
//! bootstrap failures (fatal for the whole run) and per-attempt CAS failures
//! (reported as `error` events, never fatal).

use std::time::Duration;
use thiserror::Error;

/// All castest errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A session to the store could not be opened
    #[error("failed to create a session to {endpoint}: {reason}")]
    Connect {
        /// Endpoint the connection was attempted against
        endpoint: String,
        /// Driver-reported reason
        reason: String,
    },

    /// A schema statement was rejected by the store
    #[error("failed to execute query: {statement}: {reason}")]
    Statement {
        /// Rendered statement text
        statement: String,
        /// Store-reported reason
        reason: String,
    },

    /// Request timed out before the store acknowledged it
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// Store could not serve the request (not enough replicas, shutting down, ...)
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Keyspace, table or row does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Statement is malformed for the target store
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    /// Harness configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error (writing results, reading config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for castest operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from the transport rather than from the store's answer.
    ///
    /// Transport errors leave the effect of the request unknown.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Unavailable(_))
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }

    /// Wrap a store error raised while executing `statement`.
    pub fn statement(statement: impl std::fmt::Display, source: Error) -> Self {
        Error::Statement {
            statement: statement.to_string(),
            reason: source.to_string(),
        }
    }
}
