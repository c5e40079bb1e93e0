//! Adapters - Implementations of port interfaces.
//!
//! - `validation` - Rule-table checkout payload validator

pub mod validation;

pub use validation::RuleSchemaValidator;
