//! Aggregation Tests
//!
//! Real worker threads feeding one aggregator:
//! - one completion signal per worker, no more, no fewer
//! - per-client FIFO order survives interleaving
//! - completion signals never reach the output

use crate::*;
use std::collections::BTreeMap;
use std::sync::mpsc::sync_channel;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn aggregator_waits_for_every_worker() {
    const NUM_WORKERS: u32 = 8;
    const MAX_VALUE: i64 = 25;

    let (tx, rx) = sync_channel(NUM_WORKERS as usize * castest::CHANNEL_SLOTS_PER_CLIENT);
    let barrier = Arc::new(Barrier::new(NUM_WORKERS as usize));
    let handles: Vec<_> = (1..=NUM_WORKERS)
        .map(|id| {
            let tx = tx.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Every worker sees a mix of errors and applies.
                let session = ScriptedSession::new([Scripted::TimedOut, Scripted::Applied, Scripted::TimedOut]);
                let worker = ClientWorker::new(ClientId::new(id), MAX_VALUE, Duration::ZERO);
                barrier.wait();
                worker.run(&session, &scratch_table(), &tx)
            })
        })
        .collect();
    drop(tx);

    let mut out = Vec::new();
    let summary = Aggregator::new(&mut out)
        .drain(&rx, NUM_WORKERS as usize)
        .unwrap();

    let attempts: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(summary.events, attempts);
    assert_eq!(summary.clients(), NUM_WORKERS as usize);
    for tally in summary.per_client.values() {
        assert_eq!(tally.success, MAX_VALUE as u64);
        assert_eq!(tally.error, 2);
        assert_eq!(tally.fail, 0);
    }

    // Nothing left behind the last completion signal.
    assert!(rx.try_recv().is_err());

    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().all(|line| !line.is_empty()));
}

#[test]
fn per_client_order_is_preserved() {
    const NUM_WORKERS: u32 = 4;
    const MAX_VALUE: i64 = 200;

    let (tx, rx) = sync_channel(NUM_WORKERS as usize * castest::CHANNEL_SLOTS_PER_CLIENT);
    for id in 1..=NUM_WORKERS {
        let tx = tx.clone();
        thread::spawn(move || {
            let session = ScriptedSession::always_apply();
            ClientWorker::new(ClientId::new(id), MAX_VALUE, Duration::ZERO).run(
                &session,
                &scratch_table(),
                &tx,
            )
        });
    }
    drop(tx);

    let mut out = Vec::new();
    Aggregator::new(&mut out)
        .drain(&rx, NUM_WORKERS as usize)
        .unwrap();

    let mut per_client: BTreeMap<ClientId, Vec<i64>> = BTreeMap::new();
    for event in parse_output(&out) {
        per_client
            .entry(event.client_id)
            .or_default()
            .push(event.attempted_value);
    }
    assert_eq!(per_client.len(), NUM_WORKERS as usize);
    for values in per_client.values() {
        assert_eq!(values, &(1..=MAX_VALUE).collect::<Vec<_>>());
    }
}

#[test]
fn small_channel_does_not_lose_events() {
    // Capacity 1 forces workers to block on every send.
    let (tx, rx) = sync_channel(1);
    for id in 1..=3 {
        let tx = tx.clone();
        thread::spawn(move || {
            let session = ScriptedSession::always_apply();
            ClientWorker::new(ClientId::new(id), 50, Duration::ZERO).run(
                &session,
                &scratch_table(),
                &tx,
            )
        });
    }
    drop(tx);

    let summary = Aggregator::new(Vec::new()).drain(&rx, 3).unwrap();
    assert_eq!(summary.events, 150);
    assert_eq!(summary.total().success, 150);
}

#[test]
fn panicking_worker_is_detected() {
    let (tx, rx) = sync_channel::<StreamItem>(16);
    let healthy = {
        let tx = tx.clone();
        thread::spawn(move || {
            let session = ScriptedSession::always_apply();
            ClientWorker::new(ClientId::new(1), 3, Duration::ZERO).run(&session, &scratch_table(), &tx)
        })
    };
    let doomed = thread::spawn(move || {
        let _tx = tx;
        panic!("worker died before completing");
    });

    let err = Aggregator::new(Vec::new()).drain(&rx, 2).unwrap_err();
    assert!(err.is_serious());
    healthy.join().unwrap();
    assert!(doomed.join().is_err());
}
