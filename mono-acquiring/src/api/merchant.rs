//! Merchant-level lookups: webhook public key, merchant details, employees, split
//! receivers, submerchants and the statement.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DefaultOnNull, serde_as};

use crate::client::{Client, Query};
use crate::constants::paths;
use crate::error::Error;
use crate::timestamp::UnixTimestamp;
use crate::types::{PaymentScheme, StatementStatus};
use crate::validation::{Validate, Validator};

/// Response of `GET /api/merchant/pubkey`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicKeyResponse {
    /// Base64-encoded PEM public key that signs webhooks.
    #[serde_as(as = "DefaultOnNull")]
    pub key: String,
}

/// Response of `GET /api/merchant/details`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MerchantDetailsResponse {
    /// Merchant identifier.
    #[serde_as(as = "DefaultOnNull")]
    pub merchant_id: String,
    /// Merchant name.
    #[serde_as(as = "DefaultOnNull")]
    pub merchant_name: String,
    /// Company registration number (EDRPOU).
    #[serde_as(as = "DefaultOnNull")]
    pub edrpou: String,
}

/// An employee who can receive tips.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    /// Employee identifier.
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    /// Display name.
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    /// Merchant reference.
    #[serde(rename = "extRef")]
    #[serde_as(as = "DefaultOnNull")]
    pub external_reference: String,
}

/// Response of `GET /api/merchant/employee/list`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeListResponse {
    /// Employees.
    #[serde_as(as = "DefaultOnNull")]
    pub list: Vec<Employee>,
}

/// A receiver of split payments.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitReceiver {
    /// Receiver identifier, referenced from basket items.
    #[serde_as(as = "DefaultOnNull")]
    pub split_receiver_id: String,
    /// Receiver name.
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
}

/// Response of `GET /api/merchant/split-receiver/list`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitReceiverListResponse {
    /// Receivers.
    #[serde_as(as = "DefaultOnNull")]
    pub list: Vec<SplitReceiver>,
}

/// A submerchant.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submerchant {
    /// Submerchant code, passed as `code` when creating invoices.
    #[serde_as(as = "DefaultOnNull")]
    pub code: String,
    /// Company registration number (EDRPOU).
    #[serde_as(as = "DefaultOnNull")]
    pub edrpou: String,
    /// Settlement account.
    #[serde_as(as = "DefaultOnNull")]
    pub iban: String,
    /// Account owner.
    #[serde_as(as = "DefaultOnNull")]
    pub owner: String,
}

/// Response of `GET /api/merchant/submerchant/list`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmerchantListResponse {
    /// Submerchants.
    #[serde_as(as = "DefaultOnNull")]
    pub list: Vec<Submerchant>,
}

/// Query of `GET /api/merchant/statement`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetStatementRequest {
    /// Start of the period.
    pub from: UnixTimestamp,
    /// End of the period; now if absent.
    pub to: Option<UnixTimestamp>,
    /// Restrict to one submerchant.
    pub code: Option<String>,
}

impl GetStatementRequest {
    /// Creates a request for everything since `from`.
    #[must_use]
    pub const fn since(from: UnixTimestamp) -> Self {
        Self {
            from,
            to: None,
            code: None,
        }
    }

    fn query(&self) -> Query {
        let mut query = Query::from([("from", self.from.to_string())]);
        if let Some(to) = self.to {
            query.insert("to", to.to_string());
        }
        if let Some(code) = &self.code {
            query.insert("code", code.clone());
        }
        query
    }
}

impl Validate for GetStatementRequest {
    const NAME: &'static str = "GetStatementRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("from").required(&self.from);
    }
}

/// A refund of a statement entry.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatementCancel {
    /// Refunded amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    #[serde_as(as = "DefaultOnNull")]
    pub ccy: u16,
    /// Refund time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub date: String,
    /// Authorization code.
    pub approval_code: Option<String>,
    /// Retrieval reference number.
    pub rrn: Option<String>,
    /// Masked card number.
    #[serde_as(as = "DefaultOnNull")]
    pub masked_pan: String,
}

/// A statement entry.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statement {
    /// Invoice identifier.
    #[serde_as(as = "DefaultOnNull")]
    pub invoice_id: String,
    /// Entry state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<StatementStatus>,
    /// Masked card number.
    #[serde_as(as = "DefaultOnNull")]
    pub masked_pan: String,
    /// Payment time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub date: String,
    /// Installment scheme.
    #[serde_as(as = "DefaultOnError")]
    pub payment_scheme: Option<PaymentScheme>,
    /// Amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
    /// Amount credited to the merchant, in minor units.
    pub profit_amount: Option<i64>,
    /// ISO 4217 numeric currency code.
    #[serde_as(as = "DefaultOnNull")]
    pub ccy: u16,
    /// Authorization code.
    pub approval_code: Option<String>,
    /// Retrieval reference number.
    pub rrn: Option<String>,
    /// Merchant order reference.
    pub reference: Option<String>,
    /// QR register the payment came through.
    pub short_qr_id: Option<String>,
    /// Payment purpose.
    pub destination: Option<String>,
    /// Refunds of the entry.
    #[serde_as(as = "DefaultOnNull")]
    pub cancel_list: Vec<StatementCancel>,
}

/// Response of `GET /api/merchant/statement`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementResponse {
    /// Entries of the period.
    #[serde_as(as = "DefaultOnNull")]
    pub list: Vec<Statement>,
}

impl Client {
    /// Returns the public key that signs webhooks, ready for
    /// `mono_acquiring_webhook::SignatureVerifier::new`.
    ///
    /// # Errors
    ///
    /// Returns any transport or [`Error::Request`] failure.
    pub async fn get_public_key(&self) -> Result<PublicKeyResponse, Error> {
        self.get(paths::PUBKEY, &Query::new()).await
    }

    /// Returns the merchant's identity.
    ///
    /// # Errors
    ///
    /// Returns any transport or [`Error::Request`] failure.
    pub async fn get_merchant_details(&self) -> Result<MerchantDetailsResponse, Error> {
        self.get(paths::DETAILS, &Query::new()).await
    }

    /// Lists employees that can receive tips.
    ///
    /// # Errors
    ///
    /// Returns any transport or [`Error::Request`] failure.
    pub async fn get_employee_list(&self) -> Result<EmployeeListResponse, Error> {
        self.get(paths::EMPLOYEE_LIST, &Query::new()).await
    }

    /// Lists split payment receivers.
    ///
    /// # Errors
    ///
    /// Returns any transport or [`Error::Request`] failure.
    pub async fn get_split_receiver_list(&self) -> Result<SplitReceiverListResponse, Error> {
        self.get(paths::SPLIT_RECEIVER_LIST, &Query::new()).await
    }

    /// Lists submerchants.
    ///
    /// # Errors
    ///
    /// Returns any transport or [`Error::Request`] failure.
    pub async fn get_submerchant_list(&self) -> Result<SubmerchantListResponse, Error> {
        self.get(paths::SUBMERCHANT_LIST, &Query::new()).await
    }

    /// Returns the statement for a period.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `from` is unset, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn get_statement(
        &self,
        request: &GetStatementRequest,
    ) -> Result<StatementResponse, Error> {
        request.validate()?;
        self.get(paths::STATEMENT, &request.query()).await
    }
}
