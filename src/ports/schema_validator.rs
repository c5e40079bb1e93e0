//! Schema Validator Port - Checkout payload validation interface.
//!
//! The gateway depends on this trait and calls it before building a
//! parameter set, while adapters (like `RuleSchemaValidator`) provide the
//! implementation.

use thiserror::Error;

use crate::domain::onepay::{CheckoutPayload, GatewayVariant};

/// Port for validating checkout payloads before they are signed.
///
/// # Contract
///
/// Implementations must:
/// - Check every required field is present and non-empty
/// - Check length, format and allowed-value constraints of present fields
/// - Report every failure, not just the first
/// - Be pure: no I/O, no side effects
///
/// # Usage
///
/// ```rust,ignore
/// let validator: &dyn CheckoutSchemaValidator = get_validator();
/// validator.validate(GatewayVariant::Domestic, &payload)?;
/// ```
pub trait CheckoutSchemaValidator: Send + Sync {
    /// Validate a payload, with defaults and merchant credentials merged,
    /// against the variant's schema.
    fn validate(
        &self,
        variant: GatewayVariant,
        payload: &CheckoutPayload,
    ) -> Result<(), SchemaValidationError>;
}

/// Errors that can occur during schema validation.
///
/// # Security
///
/// These errors echo field values for debugging. When returning errors to
/// customers, use `to_client_message()` which omits the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Field {field} is too long: maximum {max}, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid format for field {field}: expected {format}")]
    InvalidFormat { field: String, format: String },

    #[error("Value {value} is not allowed for field {field}: expected one of {allowed:?}")]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Parameter name {name} is reserved by the gateway")]
    ReservedParameter { name: String },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Name of the offending field, when the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaValidationError::MissingRequired { field }
            | SchemaValidationError::TooLong { field, .. }
            | SchemaValidationError::OutOfRange { field, .. }
            | SchemaValidationError::InvalidFormat { field, .. }
            | SchemaValidationError::NotAllowed { field, .. } => Some(field.as_str()),
            SchemaValidationError::ReservedParameter { name } => Some(name.as_str()),
            SchemaValidationError::Multiple(_) => None,
        }
    }

    /// Convert to client-safe error message.
    pub fn to_client_message(&self) -> String {
        match self {
            SchemaValidationError::MissingRequired { field } => {
                format!("Missing required field: {}", field)
            }
            SchemaValidationError::TooLong { field, max, .. } => {
                format!("Field '{}' must be at most {} characters", field, max)
            }
            SchemaValidationError::OutOfRange { field, min, max, .. } => {
                format!("Field '{}' must be between {} and {}", field, min, max)
            }
            SchemaValidationError::InvalidFormat { field, format } => {
                format!("Field '{}' must be a valid {}", field, format)
            }
            SchemaValidationError::NotAllowed { field, allowed, .. } => {
                format!("Field '{}' must be one of: {}", field, allowed.join(", "))
            }
            SchemaValidationError::ReservedParameter { name } => {
                format!("Parameter '{}' is reserved", name)
            }
            SchemaValidationError::Multiple(errors) => errors
                .first()
                .map(|e| e.to_client_message())
                .unwrap_or_else(|| "Validation failed".to_string()),
        }
    }

    /// Returns true if this error contains multiple validation failures.
    pub fn is_multiple(&self) -> bool {
        matches!(self, SchemaValidationError::Multiple(_))
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }

    /// Collapse a list of failures: one error stays as is, several become `Multiple`.
    pub fn collect(mut errors: Vec<SchemaValidationError>) -> Result<(), SchemaValidationError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SchemaValidationError::Multiple(errors)),
        }
    }
}
