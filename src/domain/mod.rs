//! Domain layer containing the payment gateway signing core.
//!
//! # Module Organization
//!
//! - `onepay` - Checkout signing and return verification for OnePay gateways

pub mod onepay;
