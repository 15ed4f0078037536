//! One-time schema bootstrap
//!
//! Runs sequentially on its own session before any worker starts:
//!
//! 1. `DROP KEYSPACE IF EXISTS` (only with `recreate_schema`)
//! 2. `CREATE KEYSPACE IF NOT EXISTS`
//! 3. `CREATE TABLE IF NOT EXISTS`
//! 4. seed the counter row with [`INITIAL_VALUE`]
//!
//! The session is dropped (closed) before returning. Any failure is fatal
//! for the run.

use crate::config::HarnessConfig;
use castest_core::{CasSession, Connector, Error, Result, Statement, INITIAL_VALUE};
use tracing::{debug, info};

/// Statements bootstrap executes, in order
pub fn schema_statements(config: &HarnessConfig) -> Vec<Statement> {
    let table = config.table_ref();
    let mut statements = Vec::with_capacity(4);
    if config.recreate_schema {
        statements.push(Statement::DropKeyspace {
            keyspace: config.keyspace.clone(),
        });
    }
    statements.push(Statement::CreateKeyspace {
        keyspace: config.keyspace.clone(),
        replication_factor: config.replication_factor,
    });
    statements.push(Statement::CreateCounterTable {
        table: table.clone(),
    });
    statements.push(Statement::SeedCounter {
        table,
        value: INITIAL_VALUE,
    });
    statements
}

/// Create the schema and seed the counter
pub fn bootstrap<C: Connector>(connector: &C, config: &HarnessConfig) -> Result<()> {
    let session = connector.connect()?;
    for statement in schema_statements(config) {
        debug!(%statement, "bootstrap");
        session
            .execute(&statement)
            .map_err(|e| Error::statement(&statement, e))?;
    }
    drop(session);

    info!(
        endpoint = connector.endpoint(),
        table = %config.table_ref(),
        recreated = config.recreate_schema,
        "schema ready, counter seeded"
    );
    Ok(())
}
