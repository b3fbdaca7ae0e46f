//! Client-side feasibility table for journal entry transitions.
//!
//! This mirrors the backend's workflow rules so selections can be
//! pre-checked before a bulk request is sent. The backend remains the
//! authority; a record that passes here can still be rejected server-side.

use crate::bulk::BulkAction;

use super::error::JournalError;
use super::types::EntryStatus;

/// Stateless feasibility checks for journal entry transitions.
pub struct EntryWorkflow;

impl EntryWorkflow {
    /// Returns the status an action moves entries into.
    ///
    /// `None` for removal actions (delete has no target status).
    #[must_use]
    pub const fn target_status(action: BulkAction) -> Option<EntryStatus> {
        match action {
            BulkAction::Delete => None,
            BulkAction::Approve => Some(EntryStatus::Approved),
            BulkAction::Post => Some(EntryStatus::Posted),
            BulkAction::Cancel => Some(EntryStatus::Cancelled),
            BulkAction::Reverse => Some(EntryStatus::Reversed),
            BulkAction::ResetToDraft => Some(EntryStatus::Draft),
        }
    }

    /// Returns true if `action` can be applied to an entry in `status`.
    #[must_use]
    pub const fn can_apply(action: BulkAction, status: EntryStatus) -> bool {
        matches!(
            (action, status),
            (BulkAction::Approve, EntryStatus::Draft)
                | (BulkAction::Post, EntryStatus::Approved)
                | (
                    BulkAction::Cancel,
                    EntryStatus::Draft | EntryStatus::Approved
                )
                | (BulkAction::Reverse, EntryStatus::Posted)
                | (
                    BulkAction::ResetToDraft,
                    EntryStatus::Approved | EntryStatus::Cancelled
                )
                | (
                    BulkAction::Delete,
                    EntryStatus::Draft | EntryStatus::Cancelled
                )
        )
    }

    /// Checks that `action` applies to `status`, returning the target
    /// status on success.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::NotDeletable` for delete on a non-deletable
    /// status and `JournalError::InvalidTransition` for any other
    /// infeasible transition.
    pub fn check(
        action: BulkAction,
        status: EntryStatus,
    ) -> Result<Option<EntryStatus>, JournalError> {
        if !Self::can_apply(action, status) {
            return match Self::target_status(action) {
                None => Err(JournalError::NotDeletable(status)),
                Some(target) => Err(JournalError::InvalidTransition {
                    from: status,
                    to: target,
                }),
            };
        }
        Ok(Self::target_status(action))
    }

    /// Checks the reason requirement for `action`.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::ReasonRequired` if the action needs a reason
    /// and `reason` is blank.
    pub fn check_reason(action: BulkAction, reason: &str) -> Result<(), JournalError> {
        if action.requires_reason() && reason.trim().is_empty() {
            return Err(JournalError::ReasonRequired(action));
        }
        Ok(())
    }

    /// Check if a status transition is valid, independent of action.
    ///
    /// Valid transitions:
    /// - draft → approved (approve)
    /// - approved → posted (post)
    /// - draft, approved → cancelled (cancel)
    /// - posted → reversed (reverse)
    /// - approved, cancelled → draft (reset-to-draft)
    #[must_use]
    pub const fn is_valid_transition(from: EntryStatus, to: EntryStatus) -> bool {
        matches!(
            (from, to),
            (EntryStatus::Draft, EntryStatus::Approved | EntryStatus::Cancelled)
                | (
                    EntryStatus::Approved,
                    EntryStatus::Posted | EntryStatus::Cancelled | EntryStatus::Draft
                )
                | (EntryStatus::Posted, EntryStatus::Reversed)
                | (EntryStatus::Cancelled, EntryStatus::Draft)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_from_draft() {
        assert_eq!(
            EntryWorkflow::check(BulkAction::Approve, EntryStatus::Draft).unwrap(),
            Some(EntryStatus::Approved)
        );
    }

    #[test]
    fn test_approve_from_posted_fails() {
        let result = EntryWorkflow::check(BulkAction::Approve, EntryStatus::Posted);
        assert!(matches!(
            result,
            Err(JournalError::InvalidTransition {
                from: EntryStatus::Posted,
                to: EntryStatus::Approved,
            })
        ));
    }

    #[test]
    fn test_post_requires_approved() {
        assert!(EntryWorkflow::can_apply(BulkAction::Post, EntryStatus::Approved));
        assert!(!EntryWorkflow::can_apply(BulkAction::Post, EntryStatus::Draft));
        assert!(!EntryWorkflow::can_apply(BulkAction::Post, EntryStatus::Posted));
    }

    #[test]
    fn test_cancel_from_draft_and_approved() {
        assert!(EntryWorkflow::can_apply(BulkAction::Cancel, EntryStatus::Draft));
        assert!(EntryWorkflow::can_apply(BulkAction::Cancel, EntryStatus::Approved));
        assert!(!EntryWorkflow::can_apply(BulkAction::Cancel, EntryStatus::Posted));
    }

    #[test]
    fn test_reverse_only_from_posted() {
        for status in EntryStatus::all() {
            assert_eq!(
                EntryWorkflow::can_apply(BulkAction::Reverse, status),
                status == EntryStatus::Posted
            );
        }
    }

    #[test]
    fn test_reset_to_draft() {
        assert!(EntryWorkflow::can_apply(BulkAction::ResetToDraft, EntryStatus::Approved));
        assert!(EntryWorkflow::can_apply(BulkAction::ResetToDraft, EntryStatus::Cancelled));
        assert!(!EntryWorkflow::can_apply(BulkAction::ResetToDraft, EntryStatus::Draft));
        assert!(!EntryWorkflow::can_apply(BulkAction::ResetToDraft, EntryStatus::Posted));
    }

    #[test]
    fn test_delete_from_non_deletable_status() {
        let result = EntryWorkflow::check(BulkAction::Delete, EntryStatus::Posted);
        assert!(matches!(
            result,
            Err(JournalError::NotDeletable(EntryStatus::Posted))
        ));

        assert_eq!(
            EntryWorkflow::check(BulkAction::Delete, EntryStatus::Draft).unwrap(),
            None
        );
    }

    #[test]
    fn test_check_reason() {
        assert!(EntryWorkflow::check_reason(BulkAction::Cancel, "duplicado").is_ok());
        assert!(matches!(
            EntryWorkflow::check_reason(BulkAction::Cancel, "   "),
            Err(JournalError::ReasonRequired(BulkAction::Cancel))
        ));
        assert!(matches!(
            EntryWorkflow::check_reason(BulkAction::Reverse, ""),
            Err(JournalError::ReasonRequired(BulkAction::Reverse))
        ));
        // Delete does not require a reason.
        assert!(EntryWorkflow::check_reason(BulkAction::Delete, "").is_ok());
    }

    #[test]
    fn test_reversed_is_dead_end() {
        for to in EntryStatus::all() {
            assert!(!EntryWorkflow::is_valid_transition(EntryStatus::Reversed, to));
        }
    }
}
