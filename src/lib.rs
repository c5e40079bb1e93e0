//! VN Payments - OnePay payment gateway integration
//!
//! This crate builds signed checkout URLs that redirect customers to OnePay
//! and verifies the secure hash on the callbacks OnePay sends back.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
