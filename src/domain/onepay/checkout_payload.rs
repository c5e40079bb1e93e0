//! Checkout payload: one purchase intent as supplied by the merchant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::variant::GatewayVariant;

/// Purchase intent to be signed into a checkout URL.
///
/// `amount` is in VND; the gateway multiplies it by 100 on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub amount: u64,
    pub order_id: String,
    pub transaction_id: String,
    pub client_ip: String,
    pub return_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub again_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_state_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_access_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_merchant: Option<String>,

    /// Extra merchant parameters. Names prefixed `user_` are hashed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_params: BTreeMap<String, String>,
}

/// Fields of [`CheckoutPayload`] addressable by the schema validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    Amount,
    OrderId,
    TransactionId,
    ClientIp,
    ReturnUrl,
    Currency,
    Locale,
    AgainLink,
    Title,
    CustomerEmail,
    CustomerPhone,
    CustomerId,
    DeliveryAddress,
    DeliveryCity,
    DeliveryProvince,
    DeliveryCountry,
    BillingStreet,
    BillingCity,
    BillingStateProvince,
    BillingPostCode,
    BillingCountry,
    VpcCommand,
    VpcVersion,
    VpcAccessCode,
    VpcMerchant,
}

impl CheckoutField {
    /// Field name as it appears in the serialized payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutField::Amount => "amount",
            CheckoutField::OrderId => "orderId",
            CheckoutField::TransactionId => "transactionId",
            CheckoutField::ClientIp => "clientIp",
            CheckoutField::ReturnUrl => "returnUrl",
            CheckoutField::Currency => "currency",
            CheckoutField::Locale => "locale",
            CheckoutField::AgainLink => "againLink",
            CheckoutField::Title => "title",
            CheckoutField::CustomerEmail => "customerEmail",
            CheckoutField::CustomerPhone => "customerPhone",
            CheckoutField::CustomerId => "customerId",
            CheckoutField::DeliveryAddress => "deliveryAddress",
            CheckoutField::DeliveryCity => "deliveryCity",
            CheckoutField::DeliveryProvince => "deliveryProvince",
            CheckoutField::DeliveryCountry => "deliveryCountry",
            CheckoutField::BillingStreet => "billingStreet",
            CheckoutField::BillingCity => "billingCity",
            CheckoutField::BillingStateProvince => "billingStateProvince",
            CheckoutField::BillingPostCode => "billingPostCode",
            CheckoutField::BillingCountry => "billingCountry",
            CheckoutField::VpcCommand => "vpcCommand",
            CheckoutField::VpcVersion => "vpcVersion",
            CheckoutField::VpcAccessCode => "vpcAccessCode",
            CheckoutField::VpcMerchant => "vpcMerchant",
        }
    }
}

impl CheckoutPayload {
    /// String value of a field; `None` when absent.
    ///
    /// `Amount` is numeric and always returns `None`; read `amount` directly.
    pub fn text(&self, field: CheckoutField) -> Option<&str> {
        let value = match field {
            CheckoutField::Amount => return None,
            CheckoutField::OrderId => return Some(self.order_id.as_str()),
            CheckoutField::TransactionId => return Some(self.transaction_id.as_str()),
            CheckoutField::ClientIp => return Some(self.client_ip.as_str()),
            CheckoutField::ReturnUrl => return Some(self.return_url.as_str()),
            CheckoutField::Currency => &self.currency,
            CheckoutField::Locale => &self.locale,
            CheckoutField::AgainLink => &self.again_link,
            CheckoutField::Title => &self.title,
            CheckoutField::CustomerEmail => &self.customer_email,
            CheckoutField::CustomerPhone => &self.customer_phone,
            CheckoutField::CustomerId => &self.customer_id,
            CheckoutField::DeliveryAddress => &self.delivery_address,
            CheckoutField::DeliveryCity => &self.delivery_city,
            CheckoutField::DeliveryProvince => &self.delivery_province,
            CheckoutField::DeliveryCountry => &self.delivery_country,
            CheckoutField::BillingStreet => &self.billing_street,
            CheckoutField::BillingCity => &self.billing_city,
            CheckoutField::BillingStateProvince => &self.billing_state_province,
            CheckoutField::BillingPostCode => &self.billing_post_code,
            CheckoutField::BillingCountry => &self.billing_country,
            CheckoutField::VpcCommand => &self.vpc_command,
            CheckoutField::VpcVersion => &self.vpc_version,
            CheckoutField::VpcAccessCode => &self.vpc_access_code,
            CheckoutField::VpcMerchant => &self.vpc_merchant,
        };
        value.as_deref()
    }

    /// Fills unset fields from the variant's defaults.
    pub fn with_defaults(mut self, variant: GatewayVariant) -> Self {
        let defaults = variant.profile().defaults;
        self.currency.get_or_insert_with(|| defaults.currency.to_string());
        self.locale
            .get_or_insert_with(|| defaults.locale.as_str().to_string());
        self.vpc_command
            .get_or_insert_with(|| defaults.command.to_string());
        self.vpc_version
            .get_or_insert_with(|| defaults.version.to_string());
        if let Some(title) = defaults.title {
            self.title.get_or_insert_with(|| title.to_string());
        }
        self
    }

    /// Sets the merchant credentials, overriding anything the caller supplied.
    pub fn with_merchant(mut self, merchant: &str, access_code: &str) -> Self {
        self.vpc_merchant = Some(merchant.to_string());
        self.vpc_access_code = Some(access_code.to_string());
        self
    }
}
