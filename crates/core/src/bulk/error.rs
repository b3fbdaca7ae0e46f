//! Bulk-specific validation errors.

use thiserror::Error;

use ledgerdesk_shared::ApiError;

use super::types::BulkAction;

/// Errors raised before a bulk request is sent.
#[derive(Debug, Error)]
pub enum BulkError {
    /// The selection is empty.
    #[error("No records selected")]
    EmptySelection,

    /// The action requires a reason and none was given.
    #[error("A reason is required to {0} records")]
    ReasonRequired(BulkAction),
}

impl From<BulkError> for ApiError {
    /// Converts to an `ApiError` carrying the user-facing Spanish text.
    fn from(err: BulkError) -> Self {
        match err {
            BulkError::EmptySelection => {
                Self::Validation("No hay registros seleccionados.".to_string())
            }
            BulkError::ReasonRequired(_) => {
                Self::Validation("Debe indicar un motivo para esta operación.".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_user_message() {
        let err: ApiError = BulkError::EmptySelection.into();
        assert_eq!(err.user_message(), "No hay registros seleccionados.");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_reason_required_user_message() {
        let err: ApiError = BulkError::ReasonRequired(BulkAction::Cancel).into();
        assert!(err.user_message().contains("motivo"));
    }

    #[test]
    fn test_display_names_the_action() {
        let err = BulkError::ReasonRequired(BulkAction::Reverse);
        assert_eq!(err.to_string(), "A reason is required to reverse records");
    }
}
