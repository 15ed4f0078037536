//! Worker Transition Tests
//!
//! Exact event sequences produced by a solo worker for scripted CAS answers.

use crate::*;
use castest::AttemptStatus::{Error as Errored, Fail, Success};

#[test]
fn always_applied_counts_straight_up() {
    let session = ScriptedSession::always_apply();
    let items = run_solo(&session, 1, 3);

    assert_eq!(
        items,
        vec![
            ev(1, 1, Success),
            ev(1, 2, Success),
            ev(1, 3, Success),
            StreamItem::Done(ClientId::new(1)),
        ]
    );
    assert_eq!(session.calls(), vec![(1, 2), (2, 3), (3, 4)]);
}

#[test]
fn rejection_resynchronises_to_actual_value() {
    let session = ScriptedSession::new([Scripted::Rejected(7)]);
    let items = run_solo(&session, 1, 7);

    assert_eq!(
        items,
        vec![
            ev(1, 1, Fail),
            ev(1, 7, Success),
            StreamItem::Done(ClientId::new(1)),
        ]
    );
    assert_eq!(session.calls(), vec![(1, 2), (7, 8)]);
}

#[test]
fn error_retries_same_value() {
    let session = ScriptedSession::new([Scripted::TimedOut]);
    let items = run_solo(&session, 1, 1);

    assert_eq!(
        items,
        vec![
            ev(1, 1, Errored),
            ev(1, 1, Success),
            StreamItem::Done(ClientId::new(1)),
        ]
    );
    assert_eq!(session.calls(), vec![(1, 2), (1, 2)]);
}

#[test]
fn repeated_errors_never_advance() {
    let session = ScriptedSession::new([
        Scripted::TimedOut,
        Scripted::Unavailable,
        Scripted::TimedOut,
    ]);
    let items = run_solo(&session, 4, 2);

    assert_eq!(
        items,
        vec![
            ev(4, 1, Errored),
            ev(4, 1, Errored),
            ev(4, 1, Errored),
            ev(4, 1, Success),
            ev(4, 2, Success),
            StreamItem::Done(ClientId::new(4)),
        ]
    );
}

#[test]
fn rejection_can_move_backwards() {
    let session = ScriptedSession::new([Scripted::Applied, Scripted::Applied, Scripted::Rejected(2)]);
    let items = run_solo(&session, 2, 4);

    let attempted: Vec<i64> = items
        .iter()
        .filter_map(|item| match item {
            StreamItem::Event(e) => Some(e.attempted_value),
            StreamItem::Done(_) => None,
        })
        .collect();
    assert_eq!(attempted, vec![1, 2, 3, 2, 3, 4]);
}

#[test]
fn rejection_past_max_finishes_immediately() {
    let session = ScriptedSession::new([Scripted::Rejected(100)]);
    let items = run_solo(&session, 3, 10);

    assert_eq!(
        items,
        vec![ev(3, 1, Fail), StreamItem::Done(ClientId::new(3))]
    );
}

#[test]
fn max_below_seed_emits_only_completion() {
    let session = ScriptedSession::always_apply();
    let items = run_solo(&session, 1, 0);

    assert_eq!(items, vec![StreamItem::Done(ClientId::new(1))]);
    assert!(session.calls().is_empty());
}

#[test]
fn lost_ack_self_corrects_through_rejection() {
    // The timed-out attempt actually applied; the retry sees the new value.
    let session = ScriptedSession::new([Scripted::TimedOut, Scripted::Rejected(2)]);
    let items = run_solo(&session, 1, 2);

    assert_eq!(
        items,
        vec![
            ev(1, 1, Errored),
            ev(1, 1, Fail),
            ev(1, 2, Success),
            StreamItem::Done(ClientId::new(1)),
        ]
    );
}

#[test]
fn step_reports_state_and_attempts() {
    let session = ScriptedSession::new([Scripted::Rejected(5)]);
    let mut worker = ClientWorker::new(ClientId::new(9), 5, std::time::Duration::ZERO);
    let table = scratch_table();

    assert_eq!(worker.state(), WorkerState::Running { expected: 1 });
    assert_eq!(
        worker.step(&session, &table),
        Some(ResultEvent::new(ClientId::new(9), 1, Fail))
    );
    assert_eq!(worker.state(), WorkerState::Running { expected: 5 });
    assert!(worker.step(&session, &table).is_some());
    assert!(worker.state().is_done());
    assert_eq!(worker.step(&session, &table), None);
    assert_eq!(worker.attempts(), 2);
}
