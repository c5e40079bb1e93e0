//! Validation Adapters - Schema validation implementations.
//!
//! Contains adapters for validating checkout payloads against per-field rules.

mod rule_validator;

pub use rule_validator::{
    FieldFormat, FieldRule, RuleSchemaValidator, COMMON_RULES, INTERNATIONAL_RULES, MAX_AMOUNT,
    MIN_AMOUNT,
};
