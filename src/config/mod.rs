//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VN_PAYMENTS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use vn_payments::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod logging;
mod onepay;
mod validation;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use onepay::{OnePayConfig, MAX_ACCESS_CODE_LEN, MAX_MERCHANT_LEN};
pub use validation::ValidationConfig;

use serde::Deserialize;

use crate::domain::onepay::GatewayVariant;

/// Root application configuration
///
/// Each gateway section is optional so a merchant can enable only the
/// domestic or only the international flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// OnePay domestic (ATM card) gateway
    pub onepay_domestic: Option<OnePayConfig>,

    /// OnePay international (credit card) gateway
    pub onepay_international: Option<OnePayConfig>,

    /// Checkout payload validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VN_PAYMENTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `VN_PAYMENTS__ONEPAY_DOMESTIC__MERCHANT=ONEPAY` -> `onepay_domestic.merchant`
    /// - `VN_PAYMENTS__LOGGING__LEVEL=debug` -> `logging.level`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VN_PAYMENTS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// At least one gateway must be configured.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.onepay_domestic.is_none() && self.onepay_international.is_none() {
            return Err(ValidationError::MissingRequired("ONEPAY_DOMESTIC or ONEPAY_INTERNATIONAL"));
        }
        if let Some(domestic) = &self.onepay_domestic {
            domestic.validate()?;
        }
        if let Some(international) = &self.onepay_international {
            international.validate()?;
        }
        self.validation.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Gateway settings for a variant, if configured.
    pub fn gateway(&self, variant: GatewayVariant) -> Option<&OnePayConfig> {
        match variant {
            GatewayVariant::Domestic => self.onepay_domestic.as_ref(),
            GatewayVariant::International => self.onepay_international.as_ref(),
        }
    }
}
