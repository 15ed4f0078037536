//! Shared helpers for harness tests.

pub use castest::prelude::*;
pub use castest::{
    bootstrap, Aggregator, ClientWorker, Scripted, ScriptedSession, StreamItem, WorkerState,
};
use std::sync::mpsc::sync_channel;
use std::time::Duration;

/// Table used by scripted sessions (they ignore it).
pub fn scratch_table() -> TableRef {
    TableRef::new("castest", "castest")
}

/// Run a single worker to completion against `session`, collecting its stream.
pub fn run_solo(session: &ScriptedSession, id: u32, max_value: i64) -> Vec<StreamItem> {
    let worker = ClientWorker::new(ClientId::new(id), max_value, Duration::ZERO);
    let (tx, rx) = sync_channel(1024);
    worker.run(session, &scratch_table(), &tx);
    drop(tx);
    rx.into_iter().collect()
}

/// Shorthand for a result event stream item.
pub fn ev(client: u32, value: i64, status: AttemptStatus) -> StreamItem {
    StreamItem::Event(ResultEvent::new(ClientId::new(client), value, status))
}

/// Parse aggregator output back into events.
pub fn parse_output(out: &[u8]) -> Vec<ResultEvent> {
    std::str::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| {
            let mut parts = line.split(' ');
            let client: u32 = parts.next().unwrap().parse().unwrap();
            let value: i64 = parts.next().unwrap().parse().unwrap();
            let status = match parts.next().unwrap() {
                "success" => AttemptStatus::Success,
                "fail" => AttemptStatus::Fail,
                "error" => AttemptStatus::Error,
                other => panic!("unknown status {:?} in line {:?}", other, line),
            };
            assert!(parts.next().is_none(), "extra fields in line {:?}", line);
            ResultEvent::new(ClientId::new(client), value, status)
        })
        .collect()
}

/// Harness config with the given client count and maximum.
pub fn config(clients: u32, max_value: i64) -> HarnessConfig {
    HarnessConfig {
        client_count: clients,
        max_value,
        ..HarnessConfig::default()
    }
}
