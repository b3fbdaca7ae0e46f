//! Property-based tests for bulk outcome reconciliation.

use proptest::prelude::*;
use uuid::Uuid;

use crate::bulk::outcome::{BulkOutcome, remove_succeeded};
use crate::bulk::types::{BulkResponse, ItemFailure};

/// Strategy for generating distinct ID pools.
fn arb_ids() -> impl Strategy<Value = Vec<Uuid>> {
    proptest::collection::hash_set(any::<u128>(), 0..24)
        .prop_map(|set| set.into_iter().map(Uuid::from_u128).collect())
}

/// Splits a pool into (requested, processed subset, failed subset) using
/// per-element selector masks.
fn arb_scenario() -> impl Strategy<Value = (Vec<Uuid>, BulkResponse)> {
    arb_ids().prop_flat_map(|ids| {
        let len = ids.len();
        (
            Just(ids),
            proptest::collection::vec(0u8..4, len),
        )
            .prop_map(|(ids, picks)| {
                let mut processed = Vec::new();
                let mut failed = Vec::new();
                for (id, pick) in ids.iter().zip(&picks) {
                    match pick {
                        // Reported as processed.
                        0 => processed.push(*id),
                        // Reported as failed.
                        1 => failed.push(ItemFailure {
                            id: *id,
                            reason: "rechazado".to_string(),
                        }),
                        // Reported in both lists (malformed server response).
                        2 => {
                            processed.push(*id);
                            failed.push(ItemFailure {
                                id: *id,
                                reason: "duplicado".to_string(),
                            });
                        }
                        // Not reported at all.
                        _ => {}
                    }
                }
                (ids, BulkResponse { processed, failed })
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// success_count + failure_count == total_requested, always.
    #[test]
    fn prop_counts_partition_requested_set((requested, response) in arb_scenario()) {
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        prop_assert_eq!(
            outcome.success_count() + outcome.failure_count(),
            outcome.total_requested()
        );
        prop_assert_eq!(outcome.total_requested(), requested.len());
    }

    /// Every succeeded ID was both requested and reported as processed.
    #[test]
    fn prop_succeeded_subset_of_processed((requested, response) in arb_scenario()) {
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        for id in outcome.succeeded() {
            prop_assert!(requested.contains(id));
            prop_assert!(response.processed.contains(id));
        }
    }

    /// No ID appears in both the succeeded and failed lists.
    #[test]
    fn prop_succeeded_and_failed_disjoint((requested, response) in arb_scenario()) {
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        for failure in outcome.failed() {
            prop_assert!(!outcome.succeeded().contains(&failure.id));
        }
    }

    /// Removing the succeeded subset never removes an ID the server did not
    /// report as processed, and removes all succeeded IDs.
    #[test]
    fn prop_remove_succeeded_is_exact((requested, response) in arb_scenario()) {
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        let mut items = requested.clone();
        remove_succeeded(&mut items, &outcome, |id| *id);

        prop_assert_eq!(items.len(), requested.len() - outcome.success_count());
        for id in outcome.succeeded() {
            prop_assert!(!items.contains(id));
        }
        for failure in outcome.failed() {
            prop_assert!(items.contains(&failure.id));
        }
    }
}
