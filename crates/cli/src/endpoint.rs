//! Endpoint selection.
//!
//! Only the in-process store is linked into this binary. Any other endpoint
//! is reported as a session failure when the run starts.

use castest_core::{Error, Result};
use castest_store::{FaultPlan, MemoryConnector, MemoryStore};

const MEMORY_SCHEME: &str = "mem://";

/// Parsed positional endpoint argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `mem` or `mem://<name>`
    Memory { name: String },
    /// Anything else; kept for the diagnostic
    Unsupported(String),
}

impl Endpoint {
    pub fn parse(host: &str) -> Self {
        if host == "mem" {
            return Endpoint::Memory {
                name: "mem".to_string(),
            };
        }
        match host.strip_prefix(MEMORY_SCHEME) {
            Some(name) if !name.is_empty() => Endpoint::Memory {
                name: name.to_string(),
            },
            _ => Endpoint::Unsupported(host.to_string()),
        }
    }

    /// Connector for this endpoint, or the session error a driver would report.
    pub fn connector(&self, faults: FaultPlan) -> Result<MemoryConnector> {
        match self {
            Endpoint::Memory { name } => {
                Ok(MemoryStore::new().connector(format!("{}{}", MEMORY_SCHEME, name), faults))
            }
            Endpoint::Unsupported(host) => Err(Error::Connect {
                endpoint: host.clone(),
                reason: "no driver for this endpoint (supported: mem, mem://<name>)".into(),
            }),
        }
    }
}
