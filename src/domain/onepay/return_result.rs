//! Normalized outcome of a return-URL verification.

use serde::Serialize;

use super::parameters::{names, GatewayParameterSet};

/// Whether the recomputed secure hash matched the received one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrity {
    Verified,
    Mismatch,
}

impl Integrity {
    pub fn is_verified(&self) -> bool {
        matches!(self, Integrity::Verified)
    }
}

/// Result of verifying a OnePay callback.
///
/// `is_success` is true only for an authentic callback carrying the
/// approved response code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnResult {
    pub is_success: bool,
    pub integrity: Integrity,
    pub response_code: String,
    pub message: String,
    /// `vpc_Amount` divided by 100, when it parses.
    pub amount: Option<u64>,
    pub command: Option<String>,
    pub currency_code: Option<String>,
    pub gateway_transaction_no: Option<String>,
    pub locale: Option<String>,
    pub merchant: Option<String>,
    pub order_id: Option<String>,
    pub transaction_id: Option<String>,
    pub version: Option<String>,
    pub secure_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_message: Option<String>,
    /// Every parameter as received, including the hash.
    pub parameters: GatewayParameterSet,
}

impl ReturnResult {
    pub(crate) fn from_parameters(
        parameters: GatewayParameterSet,
        integrity: Integrity,
        is_success: bool,
        message: String,
        amount_multiplier: u64,
    ) -> Self {
        let text = |name: &str| parameters.get(name).map(str::to_string);

        Self {
            is_success,
            integrity,
            response_code: text(names::TXN_RESPONSE_CODE).unwrap_or_default(),
            message,
            amount: parameters
                .get(names::AMOUNT)
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(|amount| amount / amount_multiplier.max(1)),
            command: text(names::COMMAND),
            currency_code: text(names::CURRENCY_CODE),
            gateway_transaction_no: text(names::TRANSACTION_NO),
            locale: text(names::LOCALE),
            merchant: text(names::MERCHANT),
            order_id: text(names::ORDER_INFO),
            transaction_id: text(names::MERCH_TXN_REF),
            version: text(names::VERSION),
            secure_hash: text(names::SECURE_HASH).unwrap_or_default(),
            card_type: text(names::CARD),
            authorize_id: text(names::AUTHORIZE_ID),
            batch_no: text(names::BATCH_NO),
            receipt_no: text(names::RECEIPT_NO),
            gateway_message: text(names::MESSAGE),
            parameters,
        }
    }
}
