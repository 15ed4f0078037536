//! In-memory CAS store
//!
//! [`MemoryStore`] holds a catalog of keyspaces and counter tables behind a
//! single lock. Each CAS runs entirely inside that lock, so the store
//! provides the linearizable single-row CAS the harness is meant to exercise.
//!
//! Sessions are opened through a [`MemoryConnector`], which carries the
//! [`FaultPlan`] applied to every session it opens.
//!
//! # Example
//!
//! ```
//! use castest_core::{CasSession, Connector, Statement, TableRef};
//! use castest_store::{FaultPlan, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let session = store.connector("mem", FaultPlan::none()).connect().unwrap();
//! let table = TableRef::new("ks", "t");
//!
//! session.execute(&Statement::CreateKeyspace { keyspace: "ks".into(), replication_factor: 1 }).unwrap();
//! session.execute(&Statement::CreateCounterTable { table: table.clone() }).unwrap();
//! session.execute(&Statement::SeedCounter { table: table.clone(), value: 1 }).unwrap();
//!
//! assert!(session.compare_and_swap(&table, 1, 2).unwrap().applied);
//! assert_eq!(store.counter(&table).unwrap(), 2);
//! ```

use crate::catalog::{AppliedCas, Catalog};
use crate::fault::{FaultInjector, FaultPlan};
use castest_core::{CasResult, CasSession, Connector, Error, Result, Statement, TableRef};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct Inner {
    catalog: Mutex<Catalog>,
    sessions_opened: AtomicU64,
    unavailable: AtomicBool,
}

/// Shared in-process store
///
/// Cloning is cheap; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector that opens sessions against this store
    pub fn connector(&self, endpoint: impl Into<String>, faults: FaultPlan) -> MemoryConnector {
        let endpoint = endpoint.into();
        if !faults.is_none() {
            debug!(%endpoint, ?faults, "fault injection enabled");
        }
        MemoryConnector {
            store: self.clone(),
            endpoint,
            faults,
        }
    }

    /// Current counter value in `table`
    pub fn counter(&self, table: &TableRef) -> Result<i64> {
        self.inner
            .catalog
            .lock()
            .table(table)?
            .counter()
            .ok_or_else(|| Error::NotFound(format!("counter row in {}", table)))
    }

    /// Every CAS applied to `table` since it was last seeded, in application order
    pub fn history(&self, table: &TableRef) -> Result<Vec<AppliedCas>> {
        Ok(self.inner.catalog.lock().table(table)?.history().to_vec())
    }

    /// Replication factor of `keyspace`, if it exists
    pub fn replication_factor(&self, keyspace: &str) -> Option<u32> {
        self.inner.catalog.lock().replication_factor(keyspace)
    }

    /// Number of sessions opened so far
    pub fn sessions_opened(&self) -> u64 {
        self.inner.sessions_opened.load(Ordering::Relaxed)
    }

    /// Make the store refuse new sessions and requests (or accept them again)
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.store(!available, Ordering::SeqCst);
    }

    fn is_available(&self) -> bool {
        !self.inner.unavailable.load(Ordering::SeqCst)
    }
}

/// Opens [`MemorySession`]s with a fixed [`FaultPlan`]
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    store: MemoryStore,
    endpoint: String,
    faults: FaultPlan,
}

impl Connector for MemoryConnector {
    type Session = MemorySession;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn connect(&self) -> Result<MemorySession> {
        if !self.store.is_available() {
            return Err(Error::Connect {
                endpoint: self.endpoint.clone(),
                reason: "store is not accepting connections".into(),
            });
        }
        self.faults.validate()?;

        let index = self.store.inner.sessions_opened.fetch_add(1, Ordering::Relaxed);
        debug!(endpoint = %self.endpoint, session = index, "opened memory session");
        Ok(MemorySession {
            store: self.store.clone(),
            faults: Mutex::new(self.faults.injector(index)),
            index,
        })
    }
}

/// Session against a [`MemoryStore`]
#[derive(Debug)]
pub struct MemorySession {
    store: MemoryStore,
    faults: Mutex<FaultInjector>,
    index: u64,
}

impl CasSession for MemorySession {
    fn execute(&self, statement: &Statement) -> Result<()> {
        if !self.store.is_available() {
            return Err(Error::Unavailable("store is shut down".into()));
        }
        debug!(session = self.index, %statement, "execute");
        self.store.inner.catalog.lock().apply(statement)
    }

    fn compare_and_swap(
        &self,
        table: &TableRef,
        expected: i64,
        new_value: i64,
    ) -> Result<CasResult> {
        let drop_ack = {
            let mut faults = self.faults.lock();
            faults.before_request()?;
            faults.drop_ack()
        };
        if !self.store.is_available() {
            return Err(Error::Unavailable("store is shut down".into()));
        }

        let (applied, actual) = self.store.inner.catalog.lock().compare_and_swap(
            table,
            expected,
            new_value,
            !drop_ack,
        )?;
        trace!(session = self.index, expected, new_value, applied, actual, "cas");

        if drop_ack {
            debug!(session = self.index, expected, applied, "dropping cas acknowledgement");
            return Err(Error::Timeout(crate::fault::INJECTED_TIMEOUT));
        }
        Ok(CasResult { applied, actual })
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        trace!(session = self.index, "closed memory session");
    }
}
