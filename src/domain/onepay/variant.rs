//! Gateway variants and their per-variant profiles.
//!
//! Domestic (ATM card) and international (credit card) flows share one
//! signing core. Everything that differs between them lives in a static
//! [`VariantProfile`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::canonical::HashingRules;
use super::response_code::{Locale, ResponseTable, DOMESTIC_RESPONSES, INTERNATIONAL_RESPONSES};

/// Protocol version sent as `vpc_Version`.
pub const VERSION: &str = "2";

/// Command sent as `vpc_Command`.
pub const COMMAND: &str = "pay";

/// The only currency OnePay accepts.
pub const CURRENCY_VND: &str = "VND";

/// Response code the gateway uses for an approved transaction.
pub const APPROVED_CODE: &str = "0";

/// OnePay expects amounts multiplied by this factor on the wire.
pub const AMOUNT_MULTIPLIER: u64 = 100;

/// Which OnePay flow a gateway instance talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayVariant {
    /// Vietnamese domestic ATM cards.
    Domestic,
    /// International credit and debit cards.
    International,
}

/// Default values merged under a caller's checkout payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutDefaults {
    pub currency: &'static str,
    pub locale: Locale,
    pub command: &'static str,
    pub version: &'static str,
    pub title: Option<&'static str>,
}

/// Static description of one gateway variant.
#[derive(Debug)]
pub struct VariantProfile {
    pub variant: GatewayVariant,
    pub hashing: HashingRules,
    pub approved_code: &'static str,
    pub response_codes: &'static ResponseTable,
    pub defaults: CheckoutDefaults,
    pub amount_multiplier: u64,
}

static DOMESTIC_PROFILE: VariantProfile = VariantProfile {
    variant: GatewayVariant::Domestic,
    hashing: HashingRules::ONEPAY,
    approved_code: APPROVED_CODE,
    response_codes: &DOMESTIC_RESPONSES,
    defaults: CheckoutDefaults {
        currency: CURRENCY_VND,
        locale: Locale::Vn,
        command: COMMAND,
        version: VERSION,
        title: None,
    },
    amount_multiplier: AMOUNT_MULTIPLIER,
};

static INTERNATIONAL_PROFILE: VariantProfile = VariantProfile {
    variant: GatewayVariant::International,
    hashing: HashingRules::ONEPAY,
    approved_code: APPROVED_CODE,
    response_codes: &INTERNATIONAL_RESPONSES,
    defaults: CheckoutDefaults {
        currency: CURRENCY_VND,
        locale: Locale::En,
        command: COMMAND,
        version: VERSION,
        title: Some("VPC 3-Party"),
    },
    amount_multiplier: AMOUNT_MULTIPLIER,
};

impl GatewayVariant {
    /// Returns the static profile for this variant.
    pub fn profile(&self) -> &'static VariantProfile {
        match self {
            GatewayVariant::Domestic => &DOMESTIC_PROFILE,
            GatewayVariant::International => &INTERNATIONAL_PROFILE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayVariant::Domestic => "domestic",
            GatewayVariant::International => "international",
        }
    }
}

impl fmt::Display for GatewayVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gateway variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for GatewayVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "domestic" => Ok(GatewayVariant::Domestic),
            "international" | "intl" => Ok(GatewayVariant::International),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}
