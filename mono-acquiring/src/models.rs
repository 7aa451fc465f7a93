//! Models shared by several operations.
//!
//! Request models serialize with the API's wire names; optional fields are either
//! omitted when absent or sent as `null`, following what each endpoint expects.
//! Response models accept explicit `null` for any field: scalars fall back to their
//! default and enumerations to `None`.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DefaultOnNull, serde_as};

use crate::types::{
    CancelStatus, DiscountMode, DiscountType, PaymentMethod, PaymentSystem, WalletStatus,
};
use crate::validation::{Validate, Validator};

/// Maximum length, in characters, of free-text payment descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 280;

/// Card tokenization options of an invoice or payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCardData {
    /// Save the card to the wallet after a successful payment.
    pub save_card: bool,
    /// Wallet to save the card into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

/// A discount or extra charge applied to an order or a basket item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Direction of the adjustment.
    #[serde(rename = "type")]
    pub kind: DiscountType,
    /// Whether `value` is a percentage or an amount.
    pub mode: DiscountMode,
    /// Size of the adjustment.
    pub value: f64,
}

impl Validate for Discount {
    const NAME: &'static str = "Discount";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("value").required(&self.value).min(self.value, 0.01);
    }
}

/// A line of the order basket, used for receipts and fiscalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketOrder {
    /// Item name.
    pub name: String,
    /// Quantity.
    pub qty: f64,
    /// Unit price in minor units.
    pub sum: i64,
    /// Line total in minor units.
    pub total: Option<i64>,
    /// Item image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Unit of measure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Merchant item code.
    pub code: String,
    /// Item barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Receipt header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Receipt footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Tax identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax: Vec<i64>,
    /// Ukrainian product classification code (UKTZED).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uktzed: Option<String>,
    /// Split receiver credited for this line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_receiver_id: Option<String>,
    /// Line-level discounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<Discount>,
}

impl Validate for BasketOrder {
    const NAME: &'static str = "BasketOrder";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("name").required(&self.name);
        v.field("qty").required(&self.qty);
        v.field("sum").required(&self.sum);
        v.field("code").required(&self.code);
        v.dive("discounts", &self.discounts);
    }
}

/// Merchant-side description of a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPaymentInfo {
    /// Merchant order reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Payment purpose shown to the payer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Internal comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Addresses that receive the fiscal receipt.
    #[serde(default)]
    pub customer_emails: Vec<String>,
    /// Order-level discounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<Discount>,
    /// Basket contents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub basket_order: Vec<BasketOrder>,
}

impl Validate for MerchantPaymentInfo {
    const NAME: &'static str = "MerchantPaymentInfo";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("destination")
            .max_len(self.destination.as_deref().unwrap_or_default(), MAX_DESCRIPTION_LEN);
        v.field("comment")
            .max_len(self.comment.as_deref().unwrap_or_default(), MAX_DESCRIPTION_LEN);
        v.dive_each("customer_emails", &self.customer_emails, |check, email| {
            check.email(email);
        });
        v.dive("discounts", &self.discounts);
        v.dive("basket_order", &self.basket_order);
    }
}

/// Tips left for an employee.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TipsInfo {
    /// Employee receiving the tips.
    #[serde_as(as = "DefaultOnNull")]
    pub employee_id: String,
    /// Tip amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
}

/// Card tokenization result.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletData {
    /// Token usable for later token payments.
    #[serde_as(as = "DefaultOnNull")]
    pub card_token: String,
    /// Wallet holding the token.
    #[serde_as(as = "DefaultOnNull")]
    pub wallet_id: String,
    /// Tokenization state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<WalletStatus>,
}

/// Card and processing details of a payment.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInfo {
    /// Masked card number.
    #[serde_as(as = "DefaultOnNull")]
    pub masked_pan: String,
    /// Authorization code.
    #[serde_as(as = "DefaultOnNull")]
    pub approval_code: String,
    /// Retrieval reference number.
    #[serde_as(as = "DefaultOnNull")]
    pub rrn: String,
    /// Processing transaction id.
    #[serde(rename = "tranId")]
    #[serde_as(as = "DefaultOnNull")]
    pub transaction_id: String,
    /// Terminal id.
    #[serde_as(as = "DefaultOnNull")]
    pub terminal: String,
    /// Issuing bank.
    #[serde_as(as = "DefaultOnNull")]
    pub bank: String,
    /// Card network.
    #[serde_as(as = "DefaultOnError")]
    pub payment_system: Option<PaymentSystem>,
    /// Payment means.
    #[serde_as(as = "DefaultOnError")]
    pub payment_method: Option<PaymentMethod>,
    /// Issuer country (ISO 3166-1 numeric).
    #[serde_as(as = "DefaultOnNull")]
    pub country: String,
    /// Acquiring fee in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub fee: i64,
    /// Agent fee in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub agent_fee: i64,
}

/// A cancellation (refund) applied to an invoice.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelListItem {
    /// Cancellation state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<CancelStatus>,
    /// Creation time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub created_date: String,
    /// Last modification time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub modified_date: String,
    /// Authorization code.
    #[serde_as(as = "DefaultOnNull")]
    pub approval_code: String,
    /// Retrieval reference number.
    #[serde_as(as = "DefaultOnNull")]
    pub rrn: String,
    /// Merchant reference of the cancellation.
    #[serde(rename = "extRef")]
    #[serde_as(as = "DefaultOnNull")]
    pub external_reference: String,
    /// Cancelled amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    #[serde_as(as = "DefaultOnNull")]
    pub ccy: u16,
}
