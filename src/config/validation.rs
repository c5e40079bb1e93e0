//! Checkout payload validation settings

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning for the checkout schema validator.
///
/// OnePay documents a 64 character limit for `vpc_ReturnURL` but does not
/// enforce it, so the limit is configurable here.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Reject fields that exceed their documented maximum length
    #[serde(default = "default_enforce_max_lengths")]
    pub enforce_max_lengths: bool,

    /// Maximum accepted length for the return URL
    #[serde(default = "default_return_url_max_length")]
    pub return_url_max_length: usize,
}

impl ValidationConfig {
    /// Validate the validator settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.return_url_max_length == 0 {
            return Err(ValidationError::InvalidReturnUrlLimit);
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_max_lengths: default_enforce_max_lengths(),
            return_url_max_length: default_return_url_max_length(),
        }
    }
}

fn default_enforce_max_lengths() -> bool {
    true
}

fn default_return_url_max_length() -> usize {
    255
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert!(config.enforce_max_lengths);
        assert_eq!(config.return_url_max_length, 255);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_return_url_limit_rejected() {
        let config = ValidationConfig {
            return_url_max_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidReturnUrlLimit));
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let config: ValidationConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enforce_max_lengths);
        assert_eq!(config.return_url_max_length, 255);
    }
}
