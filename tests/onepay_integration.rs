//! Integration tests for OnePay checkout signing and return-URL verification.
//!
//! These tests drive the public API end to end:
//! 1. Merchant builds a signed checkout URL from a payload
//! 2. The gateway (simulated here) appends result fields and re-signs
//! 3. Merchant verifies the return URL and reads the normalized result
//!
//! Fixtures use the public OnePay sandbox credentials.

use std::sync::Arc;

use url::Url;

use vn_payments::adapters::RuleSchemaValidator;
use vn_payments::config::OnePayConfig;
use vn_payments::domain::onepay::{
    names, CheckoutPayload, GatewayError, GatewayParameterSet, GatewayVariant, Integrity,
    OnePayGateway, DOMESTIC_RESPONSES, INTERNATIONAL_RESPONSES,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const DOMESTIC_SECRET: &str = "A3EFDFABA8653DF2342E8DAC29B51AF0";
const INTERNATIONAL_SECRET: &str = "6D0870CDE5F24F34F3915FB0045120DB";

const EXAMPLE_CHECKOUT_HASH: &str =
    "420C5EFBE501EC53415FE9D929FCDC4D154FD0906C60C6DCD946859CB5AD182A";
const EXAMPLE_CALLBACK_HASH: &str =
    "6DB2C9632981EE10D041191D973D79A150B1E6A77551B34454D297DEC05ADF1F";

fn domestic_with_secret(secret: &str) -> OnePayGateway {
    let config = OnePayConfig::new(
        "https://mtf.onepay.vn/onecomm-pay/vpc.op",
        "ONEPAY",
        "D67342C2",
        secret,
    );
    OnePayGateway::new(
        GatewayVariant::Domestic,
        &config,
        Arc::new(RuleSchemaValidator::default()),
    )
    .unwrap()
}

fn domestic() -> OnePayGateway {
    domestic_with_secret(DOMESTIC_SECRET)
}

fn international() -> OnePayGateway {
    let config = OnePayConfig::new(
        "https://mtf.onepay.vn/vpcpay/vpcpay.op",
        "TESTONEPAY",
        "6BEB2546",
        INTERNATIONAL_SECRET,
    );
    OnePayGateway::new(
        GatewayVariant::International,
        &config,
        Arc::new(RuleSchemaValidator::default()),
    )
    .unwrap()
}

fn payload() -> CheckoutPayload {
    CheckoutPayload {
        amount: 100_000,
        order_id: "ORD1".to_string(),
        transaction_id: "TXN1".to_string(),
        client_ip: "127.0.0.1".to_string(),
        return_url: "https://merchant.example/return".to_string(),
        ..Default::default()
    }
}

/// Plays the gateway: strips the request hash, adds result fields, re-signs.
fn gateway_response(
    gateway: &OnePayGateway,
    checkout_url: &Url,
    response_code: &str,
) -> GatewayParameterSet {
    let mut params = GatewayParameterSet::from_url(checkout_url);
    params.remove(names::SECURE_HASH);
    params.insert(names::TXN_RESPONSE_CODE, response_code);
    params.insert(names::TRANSACTION_NO, "1618136");
    let hash = gateway.sign(&params);
    params.insert(names::SECURE_HASH, hash.into_string());
    params
}

fn return_url(params: &GatewayParameterSet) -> String {
    let mut url = Url::parse("https://merchant.example/return").unwrap();
    params.append_to(&mut url);
    url.to_string()
}

// =============================================================================
// Checkout URL
// =============================================================================

#[test]
fn example_checkout_url_carries_pinned_hash() {
    let url = domestic().build_checkout_url(payload()).unwrap();
    let params = GatewayParameterSet::from_url(&url);

    assert_eq!(params.get(names::SECURE_HASH), Some(EXAMPLE_CHECKOUT_HASH));
    assert_eq!(params.get(names::AMOUNT), Some("10000000"));
    assert_eq!(params.get(names::CURRENCY), Some("VND"));
    assert_eq!(params.get(names::LOCALE), Some("vn"));
    assert_eq!(params.get(names::COMMAND), Some("pay"));
    assert_eq!(params.get(names::VERSION), Some("2"));
    assert_eq!(params.get(names::TICKET_NO), Some("127.0.0.1"));
}

#[test]
fn checkout_url_verifies_against_its_own_hash() {
    let gateway = domestic();
    let url = gateway.build_checkout_url(payload()).unwrap();
    let params = GatewayParameterSet::from_url(&url);

    assert_eq!(gateway.verify_signature(&params).unwrap(), Integrity::Verified);
}

#[test]
fn unprefixed_custom_param_does_not_change_hash() {
    let mut with_extra = payload();
    with_extra
        .custom_params
        .insert("campaign".to_string(), "tet".to_string());

    let url = domestic().build_checkout_url(with_extra).unwrap();
    let params = GatewayParameterSet::from_url(&url);

    assert_eq!(params.get("campaign"), Some("tet"));
    assert_eq!(params.get(names::SECURE_HASH), Some(EXAMPLE_CHECKOUT_HASH));
}

#[test]
fn user_prefixed_custom_param_is_hashed() {
    let mut with_user = payload();
    with_user
        .custom_params
        .insert("user_SessionId".to_string(), "s-1".to_string());

    let url = domestic().build_checkout_url(with_user).unwrap();
    let params = GatewayParameterSet::from_url(&url);

    assert_ne!(params.get(names::SECURE_HASH), Some(EXAMPLE_CHECKOUT_HASH));
}

#[test]
fn invalid_payload_is_rejected_before_signing() {
    let result = domestic().build_checkout_url(CheckoutPayload {
        amount: 0,
        return_url: "not a url".to_string(),
        ..payload()
    });

    match result {
        Err(GatewayError::Validation(err)) => assert_eq!(err.error_count(), 2),
        other => panic!("expected validation error, got {:?}", other),
    }
}

// =============================================================================
// Return URL
// =============================================================================

#[test]
fn example_callback_is_approved() {
    let query = format!(
        "vpc_AccessCode=D67342C2&vpc_Amount=10000000&vpc_Command=pay&vpc_Currency=VND\
         &vpc_Locale=vn&vpc_MerchTxnRef=TXN1&vpc_Merchant=ONEPAY&vpc_OrderInfo=ORD1\
         &vpc_ReturnURL=https%3A%2F%2Fmerchant.example%2Freturn&vpc_TicketNo=127.0.0.1\
         &vpc_TransactionNo=1618136&vpc_TxnResponseCode=0&vpc_Version=2\
         &vpc_SecureHash={}",
        EXAMPLE_CALLBACK_HASH
    );

    let result = domestic().verify_return_url_str(&query).unwrap();

    assert!(result.is_success);
    assert_eq!(result.integrity, Integrity::Verified);
    assert_eq!(result.response_code, "0");
    assert_eq!(result.message, "Giao dịch thành công");
    assert_eq!(result.amount, Some(100_000));
    assert_eq!(result.order_id.as_deref(), Some("ORD1"));
    assert_eq!(result.transaction_id.as_deref(), Some("TXN1"));
    assert_eq!(result.gateway_transaction_no.as_deref(), Some("1618136"));
}

#[test]
fn lowercase_received_hash_is_accepted() {
    let gateway = domestic();
    let url = gateway.build_checkout_url(payload()).unwrap();
    let mut params = gateway_response(&gateway, &url, "0");
    let lowered = params.get(names::SECURE_HASH).unwrap().to_lowercase();
    params.insert(names::SECURE_HASH, lowered);

    let result = gateway.verify_return_url(params.into_inner()).unwrap();
    assert!(result.is_success);
}

#[test]
fn full_round_trip_through_return_url() {
    let gateway = domestic();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let callback = gateway_response(&gateway, &checkout, "0");

    let result = gateway
        .verify_return_url_str(&return_url(&callback))
        .unwrap();

    assert!(result.is_success);
    assert_eq!(result.secure_hash, callback.get(names::SECURE_HASH).unwrap());
    assert_eq!(result.parameters, callback);
}

#[test]
fn declined_payment_is_verified_but_unsuccessful() {
    let gateway = domestic();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let callback = gateway_response(&gateway, &checkout, "21");

    let result = gateway.verify_return_url(callback.into_inner()).unwrap();

    assert!(!result.is_success);
    assert_eq!(result.integrity, Integrity::Verified);
    assert_eq!(result.message, DOMESTIC_RESPONSES.message("21", "vn".parse().unwrap()));
}

#[test]
fn tampered_amount_fails_integrity() {
    let gateway = domestic();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let mut callback = gateway_response(&gateway, &checkout, "0");
    callback.insert(names::AMOUNT, "100");

    let result = gateway.verify_return_url(callback.into_inner()).unwrap();

    assert!(!result.is_success);
    assert_eq!(result.integrity, Integrity::Mismatch);
    assert_eq!(result.message, "Sai mã kiểm tra dữ liệu (checksum)");
}

#[test]
fn tampered_unhashed_param_keeps_integrity() {
    let gateway = domestic();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let mut callback = gateway_response(&gateway, &checkout, "0");
    callback.insert("utm_source", "newsletter");

    let result = gateway.verify_return_url(callback.into_inner()).unwrap();
    assert!(result.is_success);
}

#[test]
fn callback_signed_with_other_secret_fails_integrity() {
    let forger = domestic_with_secret("00112233445566778899AABBCCDDEEFF");
    let checkout = forger.build_checkout_url(payload()).unwrap();
    let forged = gateway_response(&forger, &checkout, "0");

    let result = domestic().verify_return_url(forged.into_inner()).unwrap();

    assert!(!result.is_success);
    assert_eq!(result.integrity, Integrity::Mismatch);
}

#[test]
fn missing_hash_is_malformed() {
    let result = domestic().verify_return_url_str("vpc_TxnResponseCode=0&vpc_OrderInfo=ORD1");
    assert_eq!(
        result.unwrap_err(),
        GatewayError::MalformedCallback(names::SECURE_HASH)
    );
}

#[test]
fn missing_response_code_is_malformed() {
    let gateway = domestic();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let mut callback = gateway_response(&gateway, &checkout, "0");
    callback.remove(names::TXN_RESPONSE_CODE);

    let err = gateway.verify_return_url(callback.into_inner()).unwrap_err();
    assert_eq!(err, GatewayError::MalformedCallback(names::TXN_RESPONSE_CODE));
}

// =============================================================================
// International variant
// =============================================================================

#[test]
fn international_checkout_uses_billing_fields_and_title() {
    let url = international()
        .build_checkout_url(CheckoutPayload {
            billing_street: Some("1 Trang Tien".to_string()),
            billing_country: Some("VN".to_string()),
            ..payload()
        })
        .unwrap();
    let params = GatewayParameterSet::from_url(&url);

    assert_eq!(url.path(), "/vpcpay/vpcpay.op");
    assert_eq!(params.get(names::MERCHANT), Some("TESTONEPAY"));
    assert_eq!(params.get(names::LOCALE), Some("en"));
    assert_eq!(params.get(names::TITLE), Some("VPC 3-Party"));
    assert_eq!(params.get(names::AVS_STREET), Some("1 Trang Tien"));
    assert_eq!(params.get(names::AVS_COUNTRY), Some("VN"));
    assert!(!params.contains(names::CURRENCY));
}

#[test]
fn international_round_trip_reports_card_details() {
    let gateway = international();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let mut callback = GatewayParameterSet::from_url(&checkout);
    callback.remove(names::SECURE_HASH);
    callback.insert(names::TXN_RESPONSE_CODE, "0");
    callback.insert(names::CARD, "VC");
    callback.insert(names::AUTHORIZE_ID, "831000");
    callback.insert(names::MESSAGE, "Approved");
    let hash = gateway.sign(&callback);
    callback.insert(names::SECURE_HASH, hash.into_string());

    let result = gateway.verify_return_url(callback.into_inner()).unwrap();

    assert!(result.is_success);
    assert_eq!(result.message, "Transaction Successful");
    assert_eq!(result.card_type.as_deref(), Some("VC"));
    assert_eq!(result.authorize_id.as_deref(), Some("831000"));
    assert_eq!(result.gateway_message.as_deref(), Some("Approved"));
}

#[test]
fn international_unknown_code_uses_fallback() {
    let gateway = international();
    let checkout = gateway.build_checkout_url(payload()).unwrap();
    let callback = gateway_response(&gateway, &checkout, "ZZ");

    let result = gateway.verify_return_url(callback.into_inner()).unwrap();

    assert!(!result.is_success);
    assert_eq!(result.integrity, Integrity::Verified);
    assert_eq!(result.message, INTERNATIONAL_RESPONSES.fallback().en);
}

#[test]
fn domestic_hash_does_not_verify_on_international_gateway() {
    let checkout = domestic().build_checkout_url(payload()).unwrap();
    let callback = gateway_response(&domestic(), &checkout, "0");

    let result = international()
        .verify_return_url(callback.into_inner())
        .unwrap();
    assert_eq!(result.integrity, Integrity::Mismatch);
}
