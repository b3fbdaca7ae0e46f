//! Resource services: typed parameter-to-request mappers.
//!
//! One service per backend resource. Services validate input shape,
//! serialize parameters, and decode responses; every business rule stays
//! server-side.

pub mod accounts;
pub mod cost_centers;
pub mod journal_entries;
pub mod payment_terms;

use serde::de::DeserializeOwned;
use serde_json::Value;

use ledgerdesk_shared::{ApiError, AppResult};

/// Decodes a JSON response value into a typed result.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Serializes a request body.
pub(crate) fn encode<T: serde::Serialize>(body: &T) -> AppResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Maps input validation failures to a validation error.
pub(crate) fn check_input<T: validator::Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))
}
