//! Schema statements
//!
//! Bootstrap only ever needs four statements. They are kept typed so that
//! stores can interpret them without parsing CQL; [`Display`](std::fmt::Display)
//! renders the equivalent CQL text for diagnostics and for text-based drivers.

use crate::types::{TableRef, COUNTER_ROW_ID};
use std::fmt;

/// Statement executed through [`CasSession::execute`](crate::CasSession::execute)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `DROP KEYSPACE IF EXISTS <keyspace>`
    DropKeyspace {
        /// Keyspace to drop
        keyspace: String,
    },
    /// `CREATE KEYSPACE IF NOT EXISTS <keyspace> WITH replication = ...`
    CreateKeyspace {
        /// Keyspace to create
        keyspace: String,
        /// SimpleStrategy replication factor
        replication_factor: u32,
    },
    /// `CREATE TABLE IF NOT EXISTS <table> (id int PRIMARY KEY, value int)`
    CreateCounterTable {
        /// Table to create
        table: TableRef,
    },
    /// `INSERT INTO <table>(id, value) VALUES(0, <value>)`
    SeedCounter {
        /// Table holding the counter
        table: TableRef,
        /// Initial counter value
        value: i64,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::DropKeyspace { keyspace } => {
                write!(f, "DROP KEYSPACE IF EXISTS {}", keyspace)
            }
            Statement::CreateKeyspace {
                keyspace,
                replication_factor,
            } => write!(
                f,
                "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = \
                 {{'class': 'SimpleStrategy', 'replication_factor' : {}}}",
                keyspace, replication_factor
            ),
            Statement::CreateCounterTable { table } => write!(
                f,
                "CREATE TABLE IF NOT EXISTS {} (id int PRIMARY KEY, value int)",
                table
            ),
            Statement::SeedCounter { table, value } => write!(
                f,
                "INSERT INTO {}(id, value) VALUES({}, {})",
                table, COUNTER_ROW_ID, value
            ),
        }
    }
}
