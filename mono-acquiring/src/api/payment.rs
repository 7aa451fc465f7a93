//! Card payments made without the hosted payment page: direct card entry and
//! synchronous payments with wallet cryptograms or raw card data.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DefaultOnNull, serde_as};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::client::Client;
use crate::constants::paths;
use crate::error::Error;
use crate::models::{MerchantPaymentInfo, SaveCardData};
use crate::types::{CardType, InitiationKind, PaymentStatus, PaymentType};
use crate::validation::{Validate, Validator};

/// Response of `POST /api/merchant/invoice/sync-payment`; same shape as an invoice status.
pub type SyncPaymentResponse = crate::api::invoice::InvoiceStatusResponse;

/// Card details entered by the payer.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectPaymentCard {
    /// Card number.
    pub pan: String,
    /// Expiry as `MMYY`.
    pub exp: String,
    /// Card security code.
    pub cvv: String,
}

impl std::fmt::Debug for DirectPaymentCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectPaymentCard")
            .field("pan", &"[REDACTED]")
            .field("exp", &self.exp)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl Validate for DirectPaymentCard {
    const NAME: &'static str = "DirectPaymentCard";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("pan").required(&self.pan);
        v.field("exp").required(&self.exp).card_exp(&self.exp);
        v.field("cvv").required(&self.cvv);
    }
}

/// Body of `POST /api/merchant/invoice/payment-direct`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectPaymentRequest {
    /// Amount in minor units.
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    pub ccy: Option<u16>,
    /// Card to charge.
    pub card_data: DirectPaymentCard,
    /// Merchant-side payment description.
    #[serde(rename = "merchantPaymInfo", skip_serializing_if = "Option::is_none")]
    pub merchant_paym_info: Option<MerchantPaymentInfo>,
    /// Card tokenization options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_card_data: Option<SaveCardData>,
    /// Who initiated the payment.
    pub initiation_kind: Option<InitiationKind>,
    /// Debit or hold; debit unless set.
    pub payment_type: PaymentType,
}

impl Validate for DirectPaymentRequest {
    const NAME: &'static str = "DirectPaymentRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("amount").required(&self.amount);
        if let Some(ccy) = self.ccy {
            v.field("ccy").iso4217_numeric(ccy);
        }
        v.nested("card_data", &self.card_data);
        if let Some(info) = &self.merchant_paym_info {
            v.nested("merchant_paym_info", info);
        }
    }
}

/// Response of a direct or token payment.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentResponse {
    /// Invoice created for the payment.
    #[serde_as(as = "DefaultOnNull")]
    pub invoice_id: String,
    /// 3-D Secure page to send the payer to, if the issuer requires it.
    pub tds_url: Option<String>,
    /// Payment state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<PaymentStatus>,
    /// Human-readable failure reason.
    pub failure_reason: Option<String>,
    /// Amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    #[serde_as(as = "DefaultOnNull")]
    pub ccy: u16,
    /// Creation time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub created_date: String,
    /// Last modification time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub modified_date: String,
}

/// Google Pay payment token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePay {
    /// Device PAN.
    pub token: String,
    /// Expiry as `MMYY`.
    pub exp: String,
    /// Electronic commerce indicator.
    pub eci_indicator: String,
    /// Online payment cryptogram.
    pub cryptogram: Option<String>,
}

impl Validate for GooglePay {
    const NAME: &'static str = "GooglePay";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("token").required(&self.token);
        v.field("exp").required(&self.exp).card_exp(&self.exp);
        v.field("eci_indicator").required(&self.eci_indicator);
    }
}

/// Apple Pay payment token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePay {
    /// Device PAN.
    pub token: String,
    /// Expiry as `MMYY`.
    pub exp: String,
    /// Electronic commerce indicator.
    pub eci_indicator: String,
    /// Online payment cryptogram.
    pub cryptogram: Option<String>,
}

impl Validate for ApplePay {
    const NAME: &'static str = "ApplePay";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("token").required(&self.token);
        v.field("exp").required(&self.exp).card_exp(&self.exp);
        v.field("eci_indicator").required(&self.eci_indicator);
    }
}

/// Raw card data of a synchronous payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPaymentCard {
    /// Card or device number.
    pub pan: String,
    /// Whether `pan` is a funding or device PAN.
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Expiry as `MMYY`.
    pub exp: String,
    /// Electronic commerce indicator.
    pub eci_indicator: String,
    /// Card security code.
    pub cvv: Option<String>,
    /// Cardholder authentication verification value.
    pub cavv: Option<String>,
    /// Token authentication verification value.
    pub tavv: Option<String>,
    /// 3-D Secure directory server transaction id.
    pub ds_tran_id: Option<String>,
    /// Token requestor id.
    #[serde(rename = "tReqID")]
    pub token_requestor_id: Option<String>,
    /// Merchant-initiated transaction marker.
    pub mit: Option<String>,
    /// Stored credential transaction type.
    pub sst: Option<String>,
    /// Transaction id of the original cardholder-initiated payment.
    pub tid: Option<String>,
}

impl Validate for SyncPaymentCard {
    const NAME: &'static str = "SyncPaymentCard";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("pan").required(&self.pan);
        v.field("exp").required(&self.exp).card_exp(&self.exp);
        v.field("eci_indicator").required(&self.eci_indicator);
    }
}

/// Body of `POST /api/merchant/invoice/sync-payment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPaymentRequest {
    /// Amount in minor units.
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    pub ccy: u16,
    /// Merchant-side payment description.
    #[serde(rename = "merchantPaymInfo", skip_serializing_if = "Option::is_none")]
    pub merchant_paym_info: Option<MerchantPaymentInfo>,
    /// Google Pay token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_pay: Option<GooglePay>,
    /// Apple Pay token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_pay: Option<ApplePay>,
    /// Raw card data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_data: Option<SyncPaymentCard>,
}

impl Validate for SyncPaymentRequest {
    const NAME: &'static str = "SyncPaymentRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("amount").required(&self.amount);
        v.field("ccy").required(&self.ccy).iso4217_numeric(self.ccy);
        if let Some(info) = &self.merchant_paym_info {
            v.nested("merchant_paym_info", info);
        }
        if let Some(google_pay) = &self.google_pay {
            v.nested("google_pay", google_pay);
        }
        if let Some(apple_pay) = &self.apple_pay {
            v.nested("apple_pay", apple_pay);
        }
        if let Some(card) = &self.card_data {
            v.nested("card_data", card);
        }
    }
}

impl Client {
    /// Charges a card entered by the payer.
    ///
    /// The response may carry a `tds_url` the payer must visit to complete 3-D Secure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without sending anything if the request is invalid,
    /// otherwise any transport or [`Error::Request`] failure.
    #[cfg_attr(feature = "telemetry", instrument(name = "mono_acquiring.direct_payment", skip_all, err))]
    pub async fn direct_payment(
        &self,
        request: &DirectPaymentRequest,
    ) -> Result<PaymentResponse, Error> {
        request.validate()?;
        self.post(paths::INVOICE_PAYMENT_DIRECT, request).await
    }

    /// Performs a payment synchronously with a wallet token or raw card data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without sending anything if the request is invalid,
    /// otherwise any transport or [`Error::Request`] failure.
    #[cfg_attr(feature = "telemetry", instrument(name = "mono_acquiring.sync_payment", skip_all, err))]
    pub async fn sync_payment(
        &self,
        request: &SyncPaymentRequest,
    ) -> Result<SyncPaymentResponse, Error> {
        request.validate()?;
        self.post(paths::INVOICE_SYNC_PAYMENT, request).await
    }
}
