//! OnePay checkout signer and return-URL verifier.

use std::str::FromStr;
use std::sync::Arc;

use url::Url;

use super::errors::GatewayError;
use super::parameters::{names, GatewayParameterSet};
use super::response_code::{Locale, INTEGRITY_FAILURE};
use super::return_result::{Integrity, ReturnResult};
use super::secure_hash::{SecureHash, SecureSecret};
use super::variant::{GatewayVariant, VariantProfile};
use super::CheckoutPayload;
use crate::config::OnePayConfig;
use crate::ports::CheckoutSchemaValidator;

/// Parameters the gateway always includes in a return callback.
const REQUIRED_CALLBACK_PARAMS: [&str; 2] = [names::SECURE_HASH, names::TXN_RESPONSE_CODE];

/// A configured OnePay gateway for one variant.
///
/// Configuration is captured at construction and never changes, so one
/// instance can serve concurrent checkouts and callbacks.
pub struct OnePayGateway {
    variant: GatewayVariant,
    gateway_url: Url,
    merchant: String,
    access_code: String,
    secret: SecureSecret,
    validator: Arc<dyn CheckoutSchemaValidator>,
}

impl std::fmt::Debug for OnePayGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnePayGateway")
            .field("variant", &self.variant)
            .field("gateway_url", &self.gateway_url.as_str())
            .field("merchant", &self.merchant)
            .field("access_code", &self.access_code)
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

impl OnePayGateway {
    /// Creates a gateway from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if any setting is missing or malformed.
    pub fn new(
        variant: GatewayVariant,
        config: &OnePayConfig,
        validator: Arc<dyn CheckoutSchemaValidator>,
    ) -> Result<Self, GatewayError> {
        use secrecy::ExposeSecret;

        config.validate()?;
        let gateway_url = config.gateway_url()?;
        let secret = SecureSecret::from_hex(config.secure_secret.expose_secret())?;

        Ok(Self {
            variant,
            gateway_url,
            merchant: config.merchant.clone(),
            access_code: config.access_code.clone(),
            secret,
            validator,
        })
    }

    pub fn variant(&self) -> GatewayVariant {
        self.variant
    }

    fn profile(&self) -> &'static VariantProfile {
        self.variant.profile()
    }

    /// Builds the signed URL that redirects a customer to OnePay.
    ///
    /// # Steps
    ///
    /// 1. Merge variant defaults and merchant credentials into the payload
    /// 2. Validate the merged payload against the schema
    /// 3. Map the payload to gateway parameters
    /// 4. Sign the canonical string and append every parameter plus the hash
    ///
    /// # Errors
    ///
    /// - `Validation` - the payload failed schema validation; nothing is signed
    pub fn build_checkout_url(&self, payload: CheckoutPayload) -> Result<Url, GatewayError> {
        let payload = payload
            .with_defaults(self.variant)
            .with_merchant(&self.merchant, &self.access_code);

        if let Err(err) = self.validator.validate(self.variant, &payload) {
            tracing::debug!(
                variant = %self.variant,
                errors = err.error_count(),
                "Checkout payload rejected"
            );
            return Err(err.into());
        }

        let params = GatewayParameterSet::from_checkout(self.variant, &payload);
        let secure_hash = self.sign(&params);

        let mut url = self.gateway_url.clone();
        params.append_to(&mut url);
        url.query_pairs_mut()
            .append_pair(self.profile().hashing.hash_param, secure_hash.as_str());

        tracing::debug!(
            variant = %self.variant,
            order_id = %payload.order_id,
            transaction_id = %payload.transaction_id,
            "Built checkout URL"
        );

        Ok(url)
    }

    /// Signs the hashed subset of an arbitrary parameter set.
    pub fn sign(&self, params: &GatewayParameterSet) -> SecureHash {
        let canonical = params.canonical_string(&self.profile().hashing);
        self.secret.sign(&canonical)
    }

    /// Checks only the secure hash of a parameter set.
    ///
    /// # Errors
    ///
    /// - `MalformedCallback` - the hash parameter is absent
    pub fn verify_signature(&self, params: &GatewayParameterSet) -> Result<Integrity, GatewayError> {
        let hash_param = self.profile().hashing.hash_param;
        let received = params
            .get(hash_param)
            .ok_or(GatewayError::MalformedCallback(names::SECURE_HASH))?;

        if self.sign(params).matches(received) {
            Ok(Integrity::Verified)
        } else {
            Ok(Integrity::Mismatch)
        }
    }

    /// Verifies the query parameters OnePay sends back to the return URL.
    ///
    /// A hash mismatch or a declined payment is a normal result with
    /// `is_success == false`.
    ///
    /// # Errors
    ///
    /// - `MalformedCallback` - `vpc_SecureHash` or `vpc_TxnResponseCode` is absent
    pub fn verify_return_url<I, K, V>(&self, query: I) -> Result<ReturnResult, GatewayError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params: GatewayParameterSet = query.into_iter().collect();

        for required in REQUIRED_CALLBACK_PARAMS {
            if !params.contains(required) {
                tracing::warn!(
                    variant = %self.variant,
                    missing = required,
                    "Malformed OnePay callback"
                );
                return Err(GatewayError::MalformedCallback(required));
            }
        }

        let profile = self.profile();
        let integrity = self.verify_signature(&params)?;
        let response_code = params.get(names::TXN_RESPONSE_CODE).unwrap_or_default();
        let locale = params
            .get(names::LOCALE)
            .and_then(|raw| Locale::from_str(raw).ok())
            .unwrap_or(profile.defaults.locale);

        let (is_success, message) = match integrity {
            Integrity::Verified => (
                response_code == profile.approved_code,
                profile.response_codes.message(response_code, locale),
            ),
            Integrity::Mismatch => {
                tracing::warn!(
                    variant = %self.variant,
                    order_id = params.get(names::ORDER_INFO).unwrap_or_default(),
                    "OnePay callback failed secure hash verification"
                );
                (false, INTEGRITY_FAILURE.get(locale))
            }
        };

        tracing::debug!(
            variant = %self.variant,
            response_code,
            is_success,
            "Verified OnePay callback"
        );

        Ok(ReturnResult::from_parameters(
            params,
            integrity,
            is_success,
            message.to_string(),
            profile.amount_multiplier,
        ))
    }

    /// Parses a full return URL and verifies its query string.
    pub fn verify_return_url_str(&self, return_url: &str) -> Result<ReturnResult, GatewayError> {
        let params = match Url::parse(return_url) {
            Ok(url) => GatewayParameterSet::from_url(&url),
            Err(_) => GatewayParameterSet::from_query(return_url),
        };
        self.verify_return_url(params.into_inner())
    }
}
