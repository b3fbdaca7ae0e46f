//! Bulk outcome reconciliation.
//!
//! Reconciles the set of requested record IDs against the server-reported
//! partial-success response. The reconciled outcome always partitions the
//! requested set: `success_count + failure_count == total_requested`.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::types::{BulkResponse, ItemFailure};

/// Failure reason recorded for IDs the server reported in neither list.
const NO_RESULT_REASON: &str = "Sin resultado del servidor";

/// Reconciled result of a bulk operation.
///
/// Built from the requested ID set, locally rejected records, and the
/// server response. Every requested ID lands in exactly one of
/// `succeeded` or `failed`; server-reported IDs that were never requested
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    total_requested: usize,
    succeeded: Vec<Uuid>,
    failed: Vec<ItemFailure>,
}

impl BulkOutcome {
    /// Reconciles a server response against the requested IDs.
    ///
    /// `local_failures` are records that were rejected before the request
    /// was sent (client-side pre-validation); they take precedence over
    /// anything the server reports. Duplicate requested IDs are collapsed
    /// to their first occurrence.
    #[must_use]
    pub fn reconcile(
        requested: &[Uuid],
        local_failures: Vec<ItemFailure>,
        response: &BulkResponse,
    ) -> Self {
        let processed: HashSet<Uuid> = response.processed.iter().copied().collect();
        let mut reported: HashMap<Uuid, &str> = HashMap::new();
        for failure in &response.failed {
            reported.entry(failure.id).or_insert(failure.reason.as_str());
        }
        let mut local: HashMap<Uuid, String> = HashMap::new();
        for failure in local_failures {
            local.entry(failure.id).or_insert(failure.reason);
        }

        let mut seen = HashSet::new();
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for &id in requested {
            if !seen.insert(id) {
                continue;
            }
            if let Some(reason) = local.get(&id) {
                failed.push(ItemFailure {
                    id,
                    reason: reason.clone(),
                });
            } else if processed.contains(&id) {
                succeeded.push(id);
            } else if let Some(reason) = reported.get(&id) {
                failed.push(ItemFailure {
                    id,
                    reason: (*reason).to_string(),
                });
            } else {
                failed.push(ItemFailure {
                    id,
                    reason: NO_RESULT_REASON.to_string(),
                });
            }
        }

        Self {
            total_requested: seen.len(),
            succeeded,
            failed,
        }
    }

    /// Outcome for an operation that never reached the server: every
    /// requested ID failed locally.
    #[must_use]
    pub fn all_failed(local_failures: Vec<ItemFailure>) -> Self {
        let requested: Vec<Uuid> = local_failures.iter().map(|f| f.id).collect();
        Self::reconcile(&requested, local_failures, &BulkResponse::default())
    }

    /// Number of records requested (after deduplication).
    #[must_use]
    pub const fn total_requested(&self) -> usize {
        self.total_requested
    }

    /// Records processed successfully, in request order.
    #[must_use]
    pub fn succeeded(&self) -> &[Uuid] {
        &self.succeeded
    }

    /// Records that failed, with reasons, in request order.
    #[must_use]
    pub fn failed(&self) -> &[ItemFailure] {
        &self.failed
    }

    /// Number of successful records.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    /// Number of failed records.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Returns true if every requested record was processed.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.total_requested > 0
    }

    /// Percentage of requested records that succeeded, rounded to one
    /// decimal place.
    #[must_use]
    pub fn success_rate(&self) -> Decimal {
        if self.total_requested == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.success_count()) / Decimal::from(self.total_requested)
            * Decimal::ONE_HUNDRED)
            .round_dp(1)
    }

    /// User-facing summary, e.g. "2 exitosas, 1 fallo".
    #[must_use]
    pub fn summary(&self) -> String {
        let successes = match self.success_count() {
            1 => "1 exitosa".to_string(),
            n => format!("{n} exitosas"),
        };
        let failures = match self.failure_count() {
            1 => "1 fallo".to_string(),
            n => format!("{n} fallos"),
        };
        format!("{successes}, {failures}")
    }
}

/// Removes from `items` exactly the records the outcome reports as
/// succeeded. Records absent from the success list are never touched.
pub fn remove_succeeded<T>(items: &mut Vec<T>, outcome: &BulkOutcome, id_of: impl Fn(&T) -> Uuid) {
    let succeeded: HashSet<Uuid> = outcome.succeeded.iter().copied().collect();
    items.retain(|item| !succeeded.contains(&id_of(item)));
}

/// Applies `apply` to exactly the records the outcome reports as
/// succeeded, leaving every other element untouched.
pub fn update_succeeded<T>(
    items: &mut [T],
    outcome: &BulkOutcome,
    id_of: impl Fn(&T) -> Uuid,
    mut apply: impl FnMut(&mut T),
) {
    let succeeded: HashSet<Uuid> = outcome.succeeded.iter().copied().collect();
    for item in items.iter_mut() {
        if succeeded.contains(&id_of(item)) {
            apply(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|i| Uuid::from_u128(i as u128 + 1)).collect()
    }

    #[test]
    fn test_reconcile_partitions_requested_set() {
        let requested = ids(3);
        let response = BulkResponse {
            processed: vec![requested[0], requested[1]],
            failed: vec![ItemFailure {
                id: requested[2],
                reason: "Tiene movimientos".to_string(),
            }],
        };

        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        assert_eq!(outcome.total_requested(), 3);
        assert_eq!(outcome.success_count(), 2);
        assert_eq!(outcome.failure_count(), 1);
        assert_eq!(outcome.succeeded(), &requested[..2]);
        assert_eq!(outcome.failed()[0].id, requested[2]);
    }

    #[test]
    fn test_reconcile_unreported_ids_fail() {
        let requested = ids(3);
        let response = BulkResponse {
            processed: vec![requested[0]],
            failed: vec![],
        };

        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        assert_eq!(outcome.success_count(), 1);
        assert_eq!(outcome.failure_count(), 2);
        assert!(
            outcome
                .failed()
                .iter()
                .all(|f| f.reason == NO_RESULT_REASON)
        );
    }

    #[test]
    fn test_reconcile_ignores_unrequested_ids() {
        let requested = ids(2);
        let stranger = Uuid::from_u128(999);
        let response = BulkResponse {
            processed: vec![requested[0], stranger],
            failed: vec![ItemFailure {
                id: requested[1],
                reason: "x".to_string(),
            }],
        };

        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        assert_eq!(outcome.total_requested(), 2);
        assert!(!outcome.succeeded().contains(&stranger));
    }

    #[test]
    fn test_reconcile_local_failures_take_precedence() {
        let requested = ids(2);
        let local = vec![ItemFailure {
            id: requested[0],
            reason: "Transición no permitida".to_string(),
        }];
        // Server claims it processed a record we never sent it.
        let response = BulkResponse {
            processed: requested.clone(),
            failed: vec![],
        };

        let outcome = BulkOutcome::reconcile(&requested, local, &response);

        assert_eq!(outcome.success_count(), 1);
        assert_eq!(outcome.failed()[0].id, requested[0]);
        assert_eq!(outcome.failed()[0].reason, "Transición no permitida");
    }

    #[test]
    fn test_reconcile_dedups_requested() {
        let id = Uuid::from_u128(7);
        let requested = vec![id, id, id];
        let response = BulkResponse {
            processed: vec![id],
            failed: vec![],
        };

        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);
        assert_eq!(outcome.total_requested(), 1);
        assert_eq!(outcome.success_count(), 1);
    }

    #[test]
    fn test_all_failed() {
        let failures = vec![
            ItemFailure {
                id: Uuid::from_u128(1),
                reason: "a".to_string(),
            },
            ItemFailure {
                id: Uuid::from_u128(2),
                reason: "b".to_string(),
            },
        ];
        let outcome = BulkOutcome::all_failed(failures);
        assert_eq!(outcome.total_requested(), 2);
        assert_eq!(outcome.success_count(), 0);
        assert_eq!(outcome.failure_count(), 2);
        assert!(!outcome.is_complete_success());
    }

    #[test]
    fn test_success_rate() {
        let requested = ids(4);
        let response = BulkResponse {
            processed: vec![requested[0], requested[1], requested[2]],
            failed: vec![],
        };
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);
        assert_eq!(outcome.success_rate(), dec!(75.0));

        let empty = BulkOutcome::reconcile(&[], vec![], &BulkResponse::default());
        assert_eq!(empty.success_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_summary_spanish_counts() {
        let requested = ids(3);
        let response = BulkResponse {
            processed: vec![requested[0], requested[1]],
            failed: vec![ItemFailure {
                id: requested[2],
                reason: "x".to_string(),
            }],
        };
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);
        assert_eq!(outcome.summary(), "2 exitosas, 1 fallo");
    }

    #[test]
    fn test_summary_singular_and_plural() {
        let requested = ids(1);
        let response = BulkResponse {
            processed: requested.clone(),
            failed: vec![],
        };
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);
        assert_eq!(outcome.summary(), "1 exitosa, 0 fallos");
    }

    #[test]
    fn test_remove_succeeded_only_removes_reported() {
        let requested = ids(3);
        let response = BulkResponse {
            processed: vec![requested[0], requested[1]],
            failed: vec![ItemFailure {
                id: requested[2],
                reason: "x".to_string(),
            }],
        };
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        let mut items: Vec<Uuid> = requested.clone();
        remove_succeeded(&mut items, &outcome, |id| *id);

        assert_eq!(items, vec![requested[2]]);
    }

    #[test]
    fn test_update_succeeded_leaves_others_untouched() {
        let requested = ids(3);
        let response = BulkResponse {
            processed: vec![requested[1]],
            failed: vec![],
        };
        let outcome = BulkOutcome::reconcile(&requested, vec![], &response);

        let mut items: Vec<(Uuid, bool)> = requested.iter().map(|&id| (id, false)).collect();
        update_succeeded(&mut items, &outcome, |(id, _)| *id, |item| item.1 = true);

        assert!(!items[0].1);
        assert!(items[1].1);
        assert!(!items[2].1);
    }
}
