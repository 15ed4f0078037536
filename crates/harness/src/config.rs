//! Harness configuration
//!
//! Defaults match the command-line defaults. A config file may set any
//! subset of fields:
//!
//! ```toml
//! max_value = 1000
//! client_count = 8
//! delay = "5ms"
//! keyspace = "castest"
//! table = "counter"
//! replication_factor = 3
//! recreate_schema = true
//! ```

use castest_core::{Error, Result, TableRef, INITIAL_VALUE};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Run parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Workers stop once their expected value exceeds this
    pub max_value: i64,
    /// Number of concurrent workers
    pub client_count: u32,
    /// Pause after every attempt
    #[serde(deserialize_with = "castest_core::duration::deserialize")]
    pub delay: Duration,
    /// Keyspace holding the counter table
    pub keyspace: String,
    /// Counter table name
    pub table: String,
    /// Replication factor used when creating the keyspace
    pub replication_factor: u32,
    /// Drop the keyspace before creating it
    pub recreate_schema: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_value: 500,
            client_count: 5,
            delay: Duration::ZERO,
            keyspace: "castest".to_string(),
            table: "castest".to_string(),
            replication_factor: 3,
            recreate_schema: false,
        }
    }
}

impl HarnessConfig {
    /// Parse a TOML document; missing fields keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Table holding the counter
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.keyspace, &self.table)
    }

    /// Check the configuration is runnable
    pub fn validate(&self) -> Result<()> {
        if self.client_count == 0 {
            return Err(Error::InvalidConfig(
                "client_count must be at least 1".into(),
            ));
        }
        if self.max_value == i64::MAX {
            return Err(Error::InvalidConfig(format!(
                "max_value must be below {}",
                i64::MAX
            )));
        }
        if self.replication_factor == 0 {
            return Err(Error::InvalidConfig(
                "replication_factor must be at least 1".into(),
            ));
        }
        validate_identifier("keyspace", &self.keyspace)?;
        validate_identifier("table", &self.table)?;
        Ok(())
    }

    /// Whether workers will make any attempt at all
    pub fn has_work(&self) -> bool {
        self.max_value >= INITIAL_VALUE
    }
}

/// Unquoted CQL identifier: ASCII letter first, then letters, digits, underscores
fn validate_identifier(what: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::InvalidConfig(format!(
            "{} name '{}' is not a valid identifier",
            what, name
        )));
    }
    Ok(())
}
