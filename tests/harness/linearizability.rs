//! Linearizability Tests
//!
//! Many clients against the in-memory store. The store's applied-CAS history
//! must be exactly 1..=max with no gaps or duplicates, and every reported
//! `success` must match an acknowledged applied CAS.

use crate::*;

fn successes(events: &[ResultEvent]) -> Vec<i64> {
    let mut values: Vec<i64> = events
        .iter()
        .filter(|e| e.status == AttemptStatus::Success)
        .map(|e| e.attempted_value)
        .collect();
    values.sort_unstable();
    values
}

fn run(store: &MemoryStore, faults: FaultPlan, cfg: HarnessConfig) -> (Vec<ResultEvent>, RunSummary) {
    let orchestrator = Orchestrator::new(store.connector("mem://race", faults), cfg).unwrap();
    let mut out = Vec::new();
    let summary = orchestrator.run(&mut out).unwrap();
    (parse_output(&out), summary)
}

#[test]
fn contended_run_applies_every_value_once() {
    const MAX_VALUE: i64 = 300;
    let store = MemoryStore::new();
    let cfg = config(8, MAX_VALUE);
    let table = cfg.table_ref();

    let (events, summary) = run(&store, FaultPlan::none(), cfg);

    let history = store.history(&table).unwrap();
    let applied: Vec<i64> = history.iter().map(|cas| cas.expected).collect();
    assert_eq!(applied, (1..=MAX_VALUE).collect::<Vec<_>>());
    assert!(history.iter().all(|cas| cas.new_value == cas.expected + 1));

    assert_eq!(successes(&events), applied);
    assert_eq!(summary.total().success, MAX_VALUE as u64);
    assert_eq!(summary.total().error, 0);
    assert_eq!(store.counter(&table).unwrap(), MAX_VALUE + 1);
}

#[test]
fn faults_never_mask_the_history() {
    const MAX_VALUE: i64 = 150;
    let store = MemoryStore::new();
    let cfg = config(5, MAX_VALUE);
    let table = cfg.table_ref();
    let faults = FaultPlan {
        error_rate: 0.2,
        lost_ack_rate: 0.2,
        seed: Some(2024),
        ..FaultPlan::none()
    };

    let (events, summary) = run(&store, faults, cfg);

    let history = store.history(&table).unwrap();
    let applied: Vec<i64> = history.iter().map(|cas| cas.expected).collect();
    assert_eq!(applied, (1..=MAX_VALUE).collect::<Vec<_>>());

    // Reported successes are exactly the acknowledged applies.
    let mut acknowledged: Vec<i64> = history
        .iter()
        .filter(|cas| cas.acknowledged)
        .map(|cas| cas.expected)
        .collect();
    acknowledged.sort_unstable();
    assert_eq!(successes(&events), acknowledged);

    // Each lost acknowledgement surfaced as an error event.
    let lost = history.iter().filter(|cas| !cas.acknowledged).count() as u64;
    assert!(summary.total().error >= lost);
    assert_eq!(store.counter(&table).unwrap(), MAX_VALUE + 1);
}

#[test]
fn reused_schema_is_reseeded() {
    let store = MemoryStore::new();
    let cfg = config(2, 20);
    let table = cfg.table_ref();

    run(&store, FaultPlan::none(), cfg.clone());
    assert_eq!(store.counter(&table).unwrap(), 21);

    // Second run without -c: table kept, counter reseeded, history restarted.
    let (events, _) = run(&store, FaultPlan::none(), cfg);
    assert_eq!(successes(&events), (1..=20).collect::<Vec<_>>());
    assert_eq!(store.history(&table).unwrap().len(), 20);
}

#[test]
fn recreate_schema_uses_new_replication_factor() {
    let store = MemoryStore::new();
    run(&store, FaultPlan::none(), config(1, 2));
    assert_eq!(store.replication_factor("castest"), Some(3));

    let cfg = HarnessConfig {
        recreate_schema: true,
        replication_factor: 1,
        ..config(1, 2)
    };
    run(&store, FaultPlan::none(), cfg);
    assert_eq!(store.replication_factor("castest"), Some(1));
}
