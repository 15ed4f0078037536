//! Property Tests
//!
//! Termination and completion counting for arbitrary client counts, bounds
//! and fault rates against the in-memory store.

use crate::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_run_terminates_with_one_completion_per_client(
        clients in 1u32..6,
        max_value in 0i64..40,
        error_rate in 0.0f64..0.5,
        lost_ack_rate in 0.0f64..0.5,
        seed in any::<u64>(),
    ) {
        let store = MemoryStore::new();
        let cfg = config(clients, max_value);
        let table = cfg.table_ref();
        let faults = FaultPlan {
            error_rate,
            lost_ack_rate,
            seed: Some(seed),
            ..FaultPlan::none()
        };
        let orchestrator = Orchestrator::new(store.connector("mem", faults), cfg).unwrap();

        let mut out = Vec::new();
        let summary = orchestrator.run(&mut out).unwrap();

        prop_assert_eq!(summary.clients(), clients as usize);
        prop_assert_eq!(summary.events as usize, parse_output(&out).len());

        let expected_final = if max_value >= castest::INITIAL_VALUE {
            max_value + 1
        } else {
            castest::INITIAL_VALUE
        };
        prop_assert_eq!(store.counter(&table).unwrap(), expected_final);
    }

    #[test]
    fn solo_worker_against_matching_store_is_exact(max_value in 1i64..200) {
        let session = ScriptedSession::always_apply();
        let items = run_solo(&session, 1, max_value);

        prop_assert_eq!(items.len() as i64, max_value + 1);
        prop_assert_eq!(items.last(), Some(&StreamItem::Done(ClientId::new(1))));
        for (i, item) in items.iter().take(max_value as usize).enumerate() {
            prop_assert_eq!(item, &ev(1, i as i64 + 1, AttemptStatus::Success));
        }
    }
}
