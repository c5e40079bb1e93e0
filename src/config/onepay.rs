//! OnePay merchant configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use url::Url;

use super::error::ValidationError;

/// Maximum length of the `vpc_Merchant` value accepted by OnePay.
pub const MAX_MERCHANT_LEN: usize = 16;

/// Maximum length of the `vpc_AccessCode` value accepted by OnePay.
pub const MAX_ACCESS_CODE_LEN: usize = 8;

/// Credentials and endpoint for one OnePay gateway (domestic or international).
#[derive(Debug, Clone, Deserialize)]
pub struct OnePayConfig {
    /// Gateway URL provided by OnePay, e.g. `https://mtf.onepay.vn/onecomm-pay/vpc.op`
    pub payment_gateway: String,

    /// Merchant id (`vpc_Merchant`)
    pub merchant: String,

    /// Merchant access code (`vpc_AccessCode`)
    pub access_code: String,

    /// Shared secret, hex encoded
    pub secure_secret: Secret<String>,
}

impl OnePayConfig {
    /// Create a configuration from plain values.
    pub fn new(
        payment_gateway: impl Into<String>,
        merchant: impl Into<String>,
        access_code: impl Into<String>,
        secure_secret: impl Into<String>,
    ) -> Self {
        Self {
            payment_gateway: payment_gateway.into(),
            merchant: merchant.into(),
            access_code: access_code.into(),
            secure_secret: Secret::new(secure_secret.into()),
        }
    }

    /// Parsed gateway URL.
    pub fn gateway_url(&self) -> Result<Url, ValidationError> {
        let url = Url::parse(&self.payment_gateway).map_err(|_| ValidationError::InvalidGatewayUrl)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ValidationError::InvalidGatewayUrl),
        }
    }

    /// Validate OnePay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.payment_gateway.is_empty() {
            return Err(ValidationError::MissingRequired("ONEPAY_PAYMENT_GATEWAY"));
        }
        if self.merchant.is_empty() {
            return Err(ValidationError::MissingRequired("ONEPAY_MERCHANT"));
        }
        if self.access_code.is_empty() {
            return Err(ValidationError::MissingRequired("ONEPAY_ACCESS_CODE"));
        }
        if self.secure_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ONEPAY_SECURE_SECRET"));
        }

        self.gateway_url()?;

        if self.merchant.len() > MAX_MERCHANT_LEN {
            return Err(ValidationError::MerchantTooLong {
                max: MAX_MERCHANT_LEN,
            });
        }
        if self.access_code.len() > MAX_ACCESS_CODE_LEN {
            return Err(ValidationError::AccessCodeTooLong {
                max: MAX_ACCESS_CODE_LEN,
            });
        }

        let secret = self.secure_secret.expose_secret();
        if secret.len() % 2 != 0 || !secret.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidSecureSecret);
        }

        Ok(())
    }
}
