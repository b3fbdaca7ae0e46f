//! Workflow error types for journal entry transitions.

use thiserror::Error;

use ledgerdesk_shared::ApiError;

use super::types::EntryStatus;
use crate::bulk::BulkAction;

/// Errors raised by client-side workflow feasibility checks.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: EntryStatus,
        /// The attempted target status.
        to: EntryStatus,
    },

    /// Attempted to delete an entry in a non-deletable status.
    #[error("Entries with status {0} cannot be deleted")]
    NotDeletable(EntryStatus),

    /// The action requires a reason and none was given.
    #[error("A reason is required to {0} entries")]
    ReasonRequired(BulkAction),
}

impl From<JournalError> for ApiError {
    /// Converts to an `ApiError` carrying the user-facing Spanish text.
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::InvalidTransition { from, to } => Self::BusinessRule(format!(
                "Transición no permitida de '{from}' a '{to}'."
            )),
            JournalError::NotDeletable(status) => Self::BusinessRule(format!(
                "No se pueden eliminar asientos en estado '{status}'."
            )),
            JournalError::ReasonRequired(_) => {
                Self::Validation("Debe indicar un motivo para esta operación.".to_string())
            }
        }
    }
}
