//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `ApiError`.
pub type AppResult<T> = Result<T, ApiError>;

/// Generic user-facing fallback message.
const GENERIC_MESSAGE: &str = "Ocurrió un error inesperado. Intente nuevamente.";

/// Errors surfaced while talking to the accounting backend.
///
/// Variants mirror the backend's error responses plus the failure modes
/// that can only happen on the client side (network, decoding).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed or the session expired.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by input validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation reported by the backend.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., duplicate code).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend returned a 5xx response.
    #[error("Server error: {0}")]
    Server(String),

    /// The request never completed (connection, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Response decode error: {0}")]
    Decode(String),

    /// Internal client error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps an HTTP status code and server message to an error variant.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::BusinessRule(message),
            _ => Self::Server(message),
        }
    }

    /// Maps an error response body (`{"error": ..., "message": ...}`) to an
    /// error variant, preferring the human-readable `message` field.
    #[must_use]
    pub fn from_response(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| body.get("error").and_then(serde_json::Value::as_str))
            .unwrap_or_default()
            .to_string();

        Self::from_status(status, message)
    }

    /// Returns the HTTP status code this error corresponds to, if any.
    ///
    /// Client-side failures (network, decode, internal) have no status.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::BusinessRule(_) => Some(422),
            Self::Conflict(_) => Some(409),
            Self::Server(_) => Some(500),
            Self::Network(_) | Self::Decode(_) | Self::Internal(_) => None,
        }
    }

    /// Returns the stable error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Server(_) => "SERVER_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message to surface to the end user.
    ///
    /// Backend-originated messages are shown as-is when present; everything
    /// else falls back to a generic Spanish message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized(_) => "Su sesión ha expirado. Inicie sesión nuevamente.".to_string(),
            Self::Forbidden(_) => "No tiene permisos para realizar esta acción.".to_string(),
            Self::NotFound(_) => "El registro solicitado no existe.".to_string(),
            Self::Network(_) => {
                "No se pudo conectar con el servidor. Verifique su conexión.".to_string()
            }
            Self::Validation(msg) | Self::BusinessRule(msg) | Self::Conflict(msg) => {
                if msg.trim().is_empty() {
                    GENERIC_MESSAGE.to_string()
                } else {
                    msg.clone()
                }
            }
            Self::Server(_) | Self::Decode(_) | Self::Internal(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(400, "VALIDATION_ERROR")]
    #[case(401, "UNAUTHORIZED")]
    #[case(403, "FORBIDDEN")]
    #[case(404, "NOT_FOUND")]
    #[case(409, "CONFLICT")]
    #[case(422, "BUSINESS_RULE_VIOLATION")]
    #[case(500, "SERVER_ERROR")]
    #[case(503, "SERVER_ERROR")]
    fn test_from_status_mapping(#[case] status: u16, #[case] code: &str) {
        let err = ApiError::from_status(status, "msg".to_string());
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_status_code_roundtrip() {
        for status in [400, 401, 403, 404, 409, 422, 500] {
            let err = ApiError::from_status(status, String::new());
            assert_eq!(err.status_code(), Some(status));
        }
    }

    #[test]
    fn test_client_side_errors_have_no_status() {
        assert_eq!(ApiError::Network("timeout".into()).status_code(), None);
        assert_eq!(ApiError::Decode("bad json".into()).status_code(), None);
        assert_eq!(ApiError::Internal("oops".into()).status_code(), None);
    }

    #[test]
    fn test_from_response_prefers_message_field() {
        let body = json!({ "error": "duplicate_code", "message": "El código ya existe" });
        let err = ApiError::from_response(409, &body);
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "El código ya existe"));
    }

    #[test]
    fn test_from_response_falls_back_to_error_field() {
        let body = json!({ "error": "not_found" });
        let err = ApiError::from_response(404, &body);
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "not_found"));
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = ApiError::from_response(500, &json!({}));
        assert!(matches!(err, ApiError::Server(ref m) if m.is_empty()));
    }

    #[test]
    fn test_user_message_passes_through_backend_text() {
        let err = ApiError::BusinessRule("La cuenta tiene movimientos".to_string());
        assert_eq!(err.user_message(), "La cuenta tiene movimientos");
    }

    #[test]
    fn test_user_message_generic_fallback() {
        assert_eq!(
            ApiError::Server("stack trace".into()).user_message(),
            GENERIC_MESSAGE
        );
        assert_eq!(ApiError::Validation(String::new()).user_message(), GENERIC_MESSAGE);
        assert_eq!(ApiError::Conflict("   ".into()).user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_user_message_network() {
        let msg = ApiError::Network("connection refused".into()).user_message();
        assert!(msg.contains("conexión"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(ApiError::Network("msg".into()).to_string(), "Network error: msg");
    }
}
