//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid payment gateway URL")]
    InvalidGatewayUrl,

    #[error("Merchant id exceeds {max} characters")]
    MerchantTooLong { max: usize },

    #[error("Access code exceeds {max} characters")]
    AccessCodeTooLong { max: usize },

    #[error("Secure secret must be an even-length hex string")]
    InvalidSecureSecret,

    #[error("Invalid log level directive: {0}")]
    InvalidLogLevel(String),

    #[error("Return URL max length must be greater than zero")]
    InvalidReturnUrlLimit,
}
