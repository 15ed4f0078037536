//! Keyspace/table catalog backing the in-memory store
//!
//! The catalog is only ever touched under the store's lock, which is what
//! makes every CAS linearizable: the compare and the swap happen in one
//! critical section.

use castest_core::{Error, Result, Statement, TableRef, COUNTER_ROW_ID};
use std::collections::{BTreeMap, HashMap};

/// One CAS the store applied, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedCas {
    /// Value the counter held before the update
    pub expected: i64,
    /// Value written
    pub new_value: i64,
    /// Whether the client received the acknowledgement
    ///
    /// False when fault injection dropped the response after applying.
    pub acknowledged: bool,
}

#[derive(Debug, Default)]
pub(crate) struct CounterTable {
    rows: BTreeMap<i32, i64>,
    history: Vec<AppliedCas>,
}

impl CounterTable {
    pub(crate) fn counter(&self) -> Option<i64> {
        self.rows.get(&COUNTER_ROW_ID).copied()
    }

    pub(crate) fn history(&self) -> &[AppliedCas] {
        &self.history
    }
}

#[derive(Debug)]
struct Keyspace {
    replication_factor: u32,
    tables: HashMap<String, CounterTable>,
}

#[derive(Debug, Default)]
pub(crate) struct Catalog {
    keyspaces: HashMap<String, Keyspace>,
}

impl Catalog {
    pub(crate) fn apply(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::DropKeyspace { keyspace } => {
                self.keyspaces.remove(keyspace);
                Ok(())
            }
            Statement::CreateKeyspace {
                keyspace,
                replication_factor,
            } => {
                if *replication_factor == 0 {
                    return Err(Error::InvalidStatement(
                        "replication_factor must be at least 1".into(),
                    ));
                }
                self.keyspaces
                    .entry(keyspace.clone())
                    .or_insert_with(|| Keyspace {
                        replication_factor: *replication_factor,
                        tables: HashMap::new(),
                    });
                Ok(())
            }
            Statement::CreateCounterTable { table } => {
                let keyspace = self
                    .keyspaces
                    .get_mut(&table.keyspace)
                    .ok_or_else(|| Error::NotFound(format!("keyspace {}", table.keyspace)))?;
                keyspace.tables.entry(table.table.clone()).or_default();
                Ok(())
            }
            Statement::SeedCounter { table, value } => {
                let target = self.table_mut(table)?;
                target.rows.insert(COUNTER_ROW_ID, *value);
                // A re-seed starts a new counting epoch.
                target.history.clear();
                Ok(())
            }
        }
    }

    pub(crate) fn compare_and_swap(
        &mut self,
        table: &TableRef,
        expected: i64,
        new_value: i64,
        acknowledged: bool,
    ) -> Result<(bool, i64)> {
        let target = self.table_mut(table)?;
        let current = target
            .rows
            .get_mut(&COUNTER_ROW_ID)
            .ok_or_else(|| Error::NotFound(format!("row id = {} in {}", COUNTER_ROW_ID, table)))?;

        if *current != expected {
            return Ok((false, *current));
        }

        *current = new_value;
        target.history.push(AppliedCas {
            expected,
            new_value,
            acknowledged,
        });
        Ok((true, expected))
    }

    pub(crate) fn table(&self, table: &TableRef) -> Result<&CounterTable> {
        self.keyspaces
            .get(&table.keyspace)
            .and_then(|ks| ks.tables.get(&table.table))
            .ok_or_else(|| Error::NotFound(format!("table {}", table)))
    }

    pub(crate) fn replication_factor(&self, keyspace: &str) -> Option<u32> {
        self.keyspaces.get(keyspace).map(|ks| ks.replication_factor)
    }

    fn table_mut(&mut self, table: &TableRef) -> Result<&mut CounterTable> {
        self.keyspaces
            .get_mut(&table.keyspace)
            .and_then(|ks| ks.tables.get_mut(&table.table))
            .ok_or_else(|| Error::NotFound(format!("table {}", table)))
    }
}
