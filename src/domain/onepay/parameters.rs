//! Gateway parameter sets: the exact name/value strings placed on the wire.

use std::collections::BTreeMap;

use serde::Serialize;
use url::{form_urlencoded, Url};

use super::canonical::{canonical_string, HashingRules};
use super::checkout_payload::CheckoutPayload;
use super::variant::GatewayVariant;

/// Wire parameter names used by OnePay.
pub mod names {
    pub const VERSION: &str = "vpc_Version";
    pub const COMMAND: &str = "vpc_Command";
    pub const ACCESS_CODE: &str = "vpc_AccessCode";
    pub const MERCHANT: &str = "vpc_Merchant";
    pub const LOCALE: &str = "vpc_Locale";
    pub const RETURN_URL: &str = "vpc_ReturnURL";
    pub const MERCH_TXN_REF: &str = "vpc_MerchTxnRef";
    pub const ORDER_INFO: &str = "vpc_OrderInfo";
    pub const AMOUNT: &str = "vpc_Amount";
    pub const TICKET_NO: &str = "vpc_TicketNo";
    pub const CURRENCY: &str = "vpc_Currency";
    pub const AGAIN_LINK: &str = "AgainLink";
    pub const TITLE: &str = "Title";
    pub const CUSTOMER_PHONE: &str = "vpc_Customer_Phone";
    pub const CUSTOMER_EMAIL: &str = "vpc_Customer_Email";
    pub const CUSTOMER_ID: &str = "vpc_Customer_Id";
    pub const SHIP_STREET: &str = "vpc_SHIP_Street01";
    pub const SHIP_PROVINCE: &str = "vpc_SHIP_Provice";
    pub const SHIP_CITY: &str = "vpc_SHIP_City";
    pub const SHIP_COUNTRY: &str = "vpc_SHIP_Country";
    pub const AVS_STREET: &str = "AVS_Street01";
    pub const AVS_CITY: &str = "AVS_City";
    pub const AVS_STATE: &str = "AVS_StateProv";
    pub const AVS_POST_CODE: &str = "AVS_PostCode";
    pub const AVS_COUNTRY: &str = "AVS_Country";
    pub const SECURE_HASH: &str = "vpc_SecureHash";

    // Returned by the gateway on the callback
    pub const TXN_RESPONSE_CODE: &str = "vpc_TxnResponseCode";
    pub const TRANSACTION_NO: &str = "vpc_TransactionNo";
    pub const CURRENCY_CODE: &str = "vpc_CurrencyCode";
    pub const MESSAGE: &str = "vpc_Message";
    pub const CARD: &str = "vpc_Card";
    pub const AUTHORIZE_ID: &str = "vpc_AuthorizeId";
    pub const BATCH_NO: &str = "vpc_BatchNo";
    pub const RECEIPT_NO: &str = "vpc_ReceiptNo";
}

/// Ordered mapping of wire parameter names to their string values.
///
/// Values are stored exactly as they will be hashed; URL encoding only
/// happens when the set is written onto a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GatewayParameterSet(BTreeMap<String, String>);

impl GatewayParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a form-urlencoded query string (with or without a leading `?`).
    ///
    /// When a name repeats, the last occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Parses the query string of a full URL.
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs().into_owned().collect()
    }

    /// Maps a checkout payload onto OnePay's parameter names.
    ///
    /// The payload must already have defaults and merchant credentials merged.
    pub fn from_checkout(variant: GatewayVariant, payload: &CheckoutPayload) -> Self {
        let profile = variant.profile();
        let mut params = Self::new();

        params.insert_opt(names::VERSION, payload.vpc_version.as_deref());
        params.insert_opt(names::COMMAND, payload.vpc_command.as_deref());
        params.insert_opt(names::ACCESS_CODE, payload.vpc_access_code.as_deref());
        params.insert_opt(names::MERCHANT, payload.vpc_merchant.as_deref());
        params.insert_opt(names::LOCALE, payload.locale.as_deref());
        params.insert(names::RETURN_URL, &payload.return_url);
        params.insert(names::MERCH_TXN_REF, &payload.transaction_id);
        params.insert(names::ORDER_INFO, &payload.order_id);
        params.insert(
            names::AMOUNT,
            payload
                .amount
                .saturating_mul(profile.amount_multiplier)
                .to_string(),
        );
        params.insert(names::TICKET_NO, &payload.client_ip);
        params.insert_opt(names::AGAIN_LINK, payload.again_link.as_deref());
        params.insert_opt(names::TITLE, payload.title.as_deref());
        params.insert_opt(names::CUSTOMER_PHONE, payload.customer_phone.as_deref());
        params.insert_opt(names::CUSTOMER_EMAIL, payload.customer_email.as_deref());
        params.insert_opt(names::CUSTOMER_ID, payload.customer_id.as_deref());
        params.insert_opt(names::SHIP_STREET, payload.delivery_address.as_deref());
        params.insert_opt(names::SHIP_PROVINCE, payload.delivery_province.as_deref());
        params.insert_opt(names::SHIP_CITY, payload.delivery_city.as_deref());
        params.insert_opt(names::SHIP_COUNTRY, payload.delivery_country.as_deref());

        match variant {
            GatewayVariant::Domestic => {
                params.insert_opt(names::CURRENCY, payload.currency.as_deref());
            }
            GatewayVariant::International => {
                params.insert_opt(names::AVS_STREET, payload.billing_street.as_deref());
                params.insert_opt(names::AVS_CITY, payload.billing_city.as_deref());
                params.insert_opt(names::AVS_STATE, payload.billing_state_province.as_deref());
                params.insert_opt(names::AVS_POST_CODE, payload.billing_post_code.as_deref());
                params.insert_opt(names::AVS_COUNTRY, payload.billing_country.as_deref());
            }
        }

        for (name, value) in &payload.custom_params {
            params.insert(name, value);
        }

        params
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    fn insert_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical string of the hashed subset of this set.
    pub fn canonical_string(&self, rules: &HashingRules) -> String {
        canonical_string(self.iter(), rules)
    }

    /// Appends every parameter to the URL's query string, URL-encoding values.
    pub fn append_to(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in self.iter() {
            pairs.append_pair(name, value);
        }
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for GatewayParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a GatewayParameterSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
