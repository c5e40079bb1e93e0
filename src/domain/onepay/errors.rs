//! Gateway error types.
//!
//! Only programming and integration problems are errors. A forged or
//! corrupted callback and a declined payment are reported through
//! [`ReturnResult`](super::ReturnResult) instead.

use http::StatusCode;
use thiserror::Error;

use crate::config::ValidationError;
use crate::ports::SchemaValidationError;

/// Errors raised while building a checkout URL or reading a callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// The checkout payload failed schema validation.
    #[error("Invalid checkout payload: {0}")]
    Validation(#[from] SchemaValidationError),

    /// A parameter the gateway always sends is absent from the callback.
    #[error("Malformed callback: missing {0}")]
    MalformedCallback(&'static str),
}

impl GatewayError {
    /// Returns true if the caller can fix the input and try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }

    /// Maps the error to an HTTP status code for the merchant's web layer.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::MalformedCallback(_) => StatusCode::BAD_REQUEST,
        }
    }
}
