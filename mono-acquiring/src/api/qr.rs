//! QR registers (cash-desk QR codes).

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DefaultOnNull, serde_as};

use crate::client::{Client, Query};
use crate::constants::paths;
use crate::error::Error;
use crate::types::QrAmountType;
use crate::validation::{Validate, Validator};

/// A QR register of the merchant.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrListItem {
    /// Short code printed next to the QR.
    #[serde_as(as = "DefaultOnNull")]
    pub short_qr_id: String,
    /// Register identifier.
    #[serde_as(as = "DefaultOnNull")]
    pub qr_id: String,
    /// Who sets the amount.
    #[serde_as(as = "DefaultOnError")]
    pub amount_type: Option<QrAmountType>,
    /// Payment page behind the QR.
    #[serde_as(as = "DefaultOnNull")]
    pub page_url: String,
}

/// Response of `GET /api/merchant/qr/list`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrListResponse {
    /// Registers.
    #[serde_as(as = "DefaultOnNull")]
    pub list: Vec<QrListItem>,
}

/// Query of `GET /api/merchant/qr/details`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetQrDetailsRequest {
    /// Register to look up.
    pub qr_id: String,
}

impl Validate for GetQrDetailsRequest {
    const NAME: &'static str = "GetQrDetailsRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("qr_id").required(&self.qr_id);
    }
}

/// Response of `GET /api/merchant/qr/details`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrDetailsResponse {
    /// Short code printed next to the QR.
    #[serde_as(as = "DefaultOnNull")]
    pub short_qr_id: String,
    /// Invoice currently attached to the register, if any.
    pub invoice_id: Option<String>,
    /// Amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    #[serde_as(as = "DefaultOnNull")]
    pub ccy: u16,
}

/// Body of `POST /api/merchant/qr/reset-amount`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetQrAmountRequest {
    /// Register whose amount is cleared.
    pub qr_id: String,
}

impl Validate for ResetQrAmountRequest {
    const NAME: &'static str = "ResetQrAmountRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("qr_id").required(&self.qr_id);
    }
}

impl Client {
    /// Lists the merchant's QR registers.
    ///
    /// # Errors
    ///
    /// Returns any transport or [`Error::Request`] failure.
    pub async fn get_qr_list(&self) -> Result<QrListResponse, Error> {
        self.get(paths::QR_LIST, &Query::new()).await
    }

    /// Returns the state of a QR register.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the register id is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn get_qr_details(
        &self,
        request: &GetQrDetailsRequest,
    ) -> Result<QrDetailsResponse, Error> {
        request.validate()?;
        let query = Query::from([("qrId", request.qr_id.clone())]);
        self.get(paths::QR_DETAILS, &query).await
    }

    /// Clears the amount of a QR register and detaches its invoice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the register id is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn reset_qr_amount(&self, request: &ResetQrAmountRequest) -> Result<(), Error> {
        request.validate()?;
        self.post_unit(paths::QR_RESET_AMOUNT, request).await
    }
}
