//! OnePay gateway domain module.
//!
//! Builds signed checkout URLs and verifies return callbacks for the
//! domestic and international OnePay gateways.
//!
//! # Module Structure
//!
//! - `canonical` - Canonical string rules shared by signing and verification
//! - `secure_hash` - HMAC-SHA256 keyed hash and constant-time comparison
//! - `parameters` - Wire parameter sets and payload mapping
//! - `checkout_payload` - Merchant purchase intent
//! - `variant` - Domestic/international profiles
//! - `response_code` - Localized response-code tables
//! - `return_result` - Normalized callback outcome
//! - `gateway` - The signer/verifier

mod canonical;
mod checkout_payload;
mod errors;
mod gateway;
mod parameters;
mod response_code;
mod return_result;
mod secure_hash;
mod variant;

pub use canonical::{canonical_string, HashingRules};
pub use checkout_payload::{CheckoutField, CheckoutPayload};
pub use errors::GatewayError;
pub use gateway::OnePayGateway;
pub use parameters::{names, GatewayParameterSet};
pub use response_code::{
    LocalizedMessage, Locale, ResponseTable, DOMESTIC_RESPONSES, INTEGRITY_FAILURE,
    INTERNATIONAL_RESPONSES,
};
pub use return_result::{Integrity, ReturnResult};
pub use secure_hash::{SecureHash, SecureSecret};
pub use variant::{
    CheckoutDefaults, GatewayVariant, UnknownVariant, VariantProfile, AMOUNT_MULTIPLIER,
    APPROVED_CODE, COMMAND, CURRENCY_VND, VERSION,
};
