//! Rule-table validator - Implementation of CheckoutSchemaValidator.
//!
//! Each checkout field is described by a static [`FieldRule`]. The validator
//! walks the table for the payload's variant and collects every failure.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ValidationConfig;
use crate::domain::onepay::{
    names, CheckoutField, CheckoutPayload, GatewayVariant, Locale, CURRENCY_VND,
};
use crate::ports::{CheckoutSchemaValidator, SchemaValidationError};

/// Largest amount (in VND) OnePay accepts.
pub const MAX_AMOUNT: u64 = 9_999_999_999;

/// Smallest amount (in VND) worth sending to the gateway.
pub const MIN_AMOUNT: u64 = 1;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("URL pattern compiles")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Shape a string field must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Url,
    Email,
}

impl FieldFormat {
    fn name(&self) -> &'static str {
        match self {
            FieldFormat::Url => "url",
            FieldFormat::Email => "email",
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Url => URL_PATTERN.is_match(value),
            FieldFormat::Email => EMAIL_PATTERN.is_match(value),
        }
    }
}

/// Declarative constraint on one checkout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: CheckoutField,
    pub required: bool,
    pub max_length: Option<usize>,
    pub format: Option<FieldFormat>,
    pub allowed_values: &'static [&'static str],
}

impl FieldRule {
    const fn required(field: CheckoutField, max_length: usize) -> Self {
        Self {
            field,
            required: true,
            max_length: Some(max_length),
            format: None,
            allowed_values: &[],
        }
    }

    const fn optional(field: CheckoutField, max_length: usize) -> Self {
        Self {
            field,
            required: false,
            max_length: Some(max_length),
            format: None,
            allowed_values: &[],
        }
    }

    const fn one_of(field: CheckoutField, allowed_values: &'static [&'static str]) -> Self {
        Self {
            field,
            required: true,
            max_length: None,
            format: None,
            allowed_values,
        }
    }

    const fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }
}

const LOCALES: [&str; 2] = [Locale::Vn.as_str(), Locale::En.as_str()];

/// Rules shared by both gateway variants.
pub const COMMON_RULES: &[FieldRule] = &[
    FieldRule::optional(CheckoutField::AgainLink, 64).with_format(FieldFormat::Url),
    FieldRule::required(CheckoutField::ClientIp, 15),
    FieldRule::one_of(CheckoutField::Currency, &[CURRENCY_VND]),
    FieldRule::optional(CheckoutField::CustomerEmail, 24).with_format(FieldFormat::Email),
    FieldRule::optional(CheckoutField::CustomerId, 64),
    FieldRule::optional(CheckoutField::CustomerPhone, 16),
    FieldRule::optional(CheckoutField::DeliveryAddress, 64),
    FieldRule::optional(CheckoutField::DeliveryCity, 64),
    FieldRule::optional(CheckoutField::DeliveryCountry, 8),
    FieldRule::optional(CheckoutField::DeliveryProvince, 64),
    FieldRule::one_of(CheckoutField::Locale, &LOCALES),
    FieldRule::required(CheckoutField::OrderId, 32),
    FieldRule::required(CheckoutField::ReturnUrl, 255).with_format(FieldFormat::Url),
    FieldRule::optional(CheckoutField::Title, 255),
    FieldRule::required(CheckoutField::TransactionId, 34),
    FieldRule::required(CheckoutField::VpcAccessCode, 8),
    FieldRule::required(CheckoutField::VpcCommand, 16),
    FieldRule::required(CheckoutField::VpcMerchant, 16),
    FieldRule::required(CheckoutField::VpcVersion, 2),
];

/// Billing address rules, only sent by the international gateway.
pub const INTERNATIONAL_RULES: &[FieldRule] = &[
    FieldRule::optional(CheckoutField::BillingCity, 64),
    FieldRule::optional(CheckoutField::BillingCountry, 2),
    FieldRule::optional(CheckoutField::BillingPostCode, 64),
    FieldRule::optional(CheckoutField::BillingStateProvince, 64),
    FieldRule::optional(CheckoutField::BillingStreet, 64),
];

/// Wire names a custom parameter may not shadow.
const RESERVED_NAMES: [&str; 7] = [
    names::AGAIN_LINK,
    names::TITLE,
    names::AVS_STREET,
    names::AVS_CITY,
    names::AVS_STATE,
    names::AVS_POST_CODE,
    names::AVS_COUNTRY,
];

/// Validator driven by the static rule tables.
///
/// # Thread Safety
///
/// This struct is `Send + Sync` and can be shared across threads.
#[derive(Debug, Clone)]
pub struct RuleSchemaValidator {
    enforce_max_lengths: bool,
    return_url_max_length: usize,
}

impl Default for RuleSchemaValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl RuleSchemaValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            enforce_max_lengths: config.enforce_max_lengths,
            return_url_max_length: config.return_url_max_length,
        }
    }

    /// Rules applied to a variant's payloads.
    pub fn rules_for(variant: GatewayVariant) -> impl Iterator<Item = &'static FieldRule> {
        let extra: &'static [FieldRule] = match variant {
            GatewayVariant::Domestic => &[],
            GatewayVariant::International => INTERNATIONAL_RULES,
        };
        COMMON_RULES.iter().chain(extra.iter())
    }

    fn max_length(&self, rule: &FieldRule) -> Option<usize> {
        if !self.enforce_max_lengths {
            return None;
        }
        match rule.field {
            CheckoutField::ReturnUrl => Some(self.return_url_max_length),
            _ => rule.max_length,
        }
    }

    fn check_rule(
        &self,
        rule: &FieldRule,
        payload: &CheckoutPayload,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let field = rule.field.as_str();
        let value = match payload.text(rule.field) {
            Some(value) if !value.is_empty() => value,
            _ => {
                if rule.required {
                    errors.push(SchemaValidationError::MissingRequired {
                        field: field.to_string(),
                    });
                }
                return;
            }
        };

        if let Some(max) = self.max_length(rule) {
            let actual = value.chars().count();
            if actual > max {
                errors.push(SchemaValidationError::TooLong {
                    field: field.to_string(),
                    max,
                    actual,
                });
            }
        }

        if let Some(format) = rule.format {
            if !format.matches(value) {
                errors.push(SchemaValidationError::InvalidFormat {
                    field: field.to_string(),
                    format: format.name().to_string(),
                });
            }
        }

        if !rule.allowed_values.is_empty() && !rule.allowed_values.contains(&value) {
            errors.push(SchemaValidationError::NotAllowed {
                field: field.to_string(),
                value: value.to_string(),
                allowed: rule.allowed_values.iter().map(|v| v.to_string()).collect(),
            });
        }
    }

    fn check_amount(&self, payload: &CheckoutPayload, errors: &mut Vec<SchemaValidationError>) {
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&payload.amount) {
            errors.push(SchemaValidationError::OutOfRange {
                field: CheckoutField::Amount.as_str().to_string(),
                value: payload.amount.to_string(),
                min: MIN_AMOUNT.to_string(),
                max: MAX_AMOUNT.to_string(),
            });
        }
    }

    fn check_custom_params(
        &self,
        payload: &CheckoutPayload,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        for name in payload.custom_params.keys() {
            if name.is_empty() {
                errors.push(SchemaValidationError::InvalidFormat {
                    field: "customParams".to_string(),
                    format: "non-empty parameter name".to_string(),
                });
            } else if name.starts_with("vpc_") || RESERVED_NAMES.contains(&name.as_str()) {
                errors.push(SchemaValidationError::ReservedParameter { name: name.clone() });
            }
        }
    }
}

impl CheckoutSchemaValidator for RuleSchemaValidator {
    fn validate(
        &self,
        variant: GatewayVariant,
        payload: &CheckoutPayload,
    ) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();

        self.check_amount(payload, &mut errors);
        for rule in Self::rules_for(variant) {
            self.check_rule(rule, payload, &mut errors);
        }
        self.check_custom_params(payload, &mut errors);

        SchemaValidationError::collect(errors)
    }
}
