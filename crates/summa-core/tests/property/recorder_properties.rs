//! Property tests for the flight recorder's running union.

use std::collections::BTreeSet;

use proptest::prelude::*;

use summa_core::FlightRecorder;

/// One round: disjoint accept / reject / implicit-reject sets drawn from a small vocabulary.
fn round_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<String>)> {
    prop::collection::vec((0_usize..30, 0_u8..4), 0..12).prop_map(|labels| {
        let mut accept = BTreeSet::new();
        let mut reject = BTreeSet::new();
        let mut implicit = BTreeSet::new();
        let mut seen = BTreeSet::new();
        for (concept, bucket) in labels {
            if !seen.insert(concept) {
                continue;
            }
            let key = format!("c{concept}");
            match bucket {
                0 => {
                    accept.insert(key);
                }
                1 => {
                    reject.insert(key);
                }
                2 => {
                    implicit.insert(key);
                }
                _ => {}
            }
        }
        (
            accept.into_iter().collect(),
            reject.into_iter().collect(),
            implicit.into_iter().collect(),
        )
    })
}

proptest! {
    #[test]
    fn union_never_shrinks(rounds in prop::collection::vec(round_strategy(), 1..20)) {
        let mut recorder = FlightRecorder::new();
        for (accept, reject, implicit) in rounds {
            let before = recorder.union().clone();
            recorder.record(accept, reject, implicit).unwrap();
            let after = recorder.union();
            prop_assert!(after.accept().is_superset(before.accept()));
            prop_assert!(after.reject().is_superset(before.reject()));
            prop_assert!(after.implicit_reject().is_superset(before.implicit_reject()));
        }
    }

    #[test]
    fn union_equals_union_of_records(rounds in prop::collection::vec(round_strategy(), 0..20)) {
        let mut recorder = FlightRecorder::new();
        for (accept, reject, implicit) in rounds {
            recorder.record(accept, reject, implicit).unwrap();
        }
        let accept: BTreeSet<String> = recorder
            .records()
            .iter()
            .flat_map(|r| r.accept().iter().cloned())
            .collect();
        let reject: BTreeSet<String> = recorder
            .records()
            .iter()
            .flat_map(|r| r.reject().iter().cloned())
            .collect();
        prop_assert_eq!(recorder.union().accept(), &accept);
        prop_assert_eq!(recorder.union().reject(), &reject);
    }
}
