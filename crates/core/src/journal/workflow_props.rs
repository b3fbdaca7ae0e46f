//! Property-based tests for the entry workflow feasibility table.

use proptest::prelude::*;

use crate::bulk::BulkAction;
use crate::journal::error::JournalError;
use crate::journal::types::EntryStatus;
use crate::journal::workflow::EntryWorkflow;

/// Strategy for generating random statuses.
fn arb_status() -> impl Strategy<Value = EntryStatus> {
    prop_oneof![
        Just(EntryStatus::Draft),
        Just(EntryStatus::Approved),
        Just(EntryStatus::Posted),
        Just(EntryStatus::Cancelled),
        Just(EntryStatus::Reversed),
    ]
}

/// Strategy for generating random actions.
fn arb_action() -> impl Strategy<Value = BulkAction> {
    prop_oneof![
        Just(BulkAction::Delete),
        Just(BulkAction::Approve),
        Just(BulkAction::Post),
        Just(BulkAction::Cancel),
        Just(BulkAction::Reverse),
        Just(BulkAction::ResetToDraft),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// check() succeeds exactly when can_apply() is true.
    #[test]
    fn prop_check_agrees_with_can_apply(action in arb_action(), status in arb_status()) {
        let check = EntryWorkflow::check(action, status);
        prop_assert_eq!(check.is_ok(), EntryWorkflow::can_apply(action, status));
    }

    /// A successful check returns the action's target status.
    #[test]
    fn prop_check_returns_target(action in arb_action(), status in arb_status()) {
        if let Ok(target) = EntryWorkflow::check(action, status) {
            prop_assert_eq!(target, EntryWorkflow::target_status(action));
        }
    }

    /// Every feasible non-delete action is a valid transition edge.
    #[test]
    fn prop_feasible_actions_are_valid_transitions(
        action in arb_action(),
        status in arb_status()
    ) {
        prop_assume!(action != BulkAction::Delete);
        if EntryWorkflow::can_apply(action, status) {
            let target = EntryWorkflow::target_status(action).unwrap();
            prop_assert!(EntryWorkflow::is_valid_transition(status, target));
        }
    }

    /// Nothing transitions out of reversed.
    #[test]
    fn prop_reversed_admits_no_action(action in arb_action()) {
        let result = EntryWorkflow::check(action, EntryStatus::Reversed);
        let matched = matches!(
            result,
            Err(JournalError::InvalidTransition { .. } | JournalError::NotDeletable(_))
        );
        prop_assert!(matched);
    }
}
