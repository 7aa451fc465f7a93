//! Invoice lifecycle: creation, status, cancellation, invalidation, hold finalization,
//! receipts and fiscal checks.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DefaultOnNull, serde_as};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::client::{Client, Query};
use crate::constants::paths;
use crate::error::Error;
use crate::models::{
    BasketOrder, CancelListItem, MerchantPaymentInfo, PaymentInfo, SaveCardData, TipsInfo, WalletData,
};
use crate::types::{
    CancelStatus, DisplayType, FiscalCheckSource, FiscalCheckStatus, FiscalCheckType,
    HoldFinalizationStatus, InvoiceStatus, PaymentType,
};
use crate::validation::{Validate, Validator};

/// Body of `POST /api/merchant/invoice/create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreateRequest {
    /// Amount in minor units.
    pub amount: i64,
    /// ISO 4217 numeric currency code; the API defaults to UAH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccy: Option<u16>,
    /// Merchant-side payment description.
    #[serde(rename = "merchantPaymInfo", skip_serializing_if = "Option::is_none")]
    pub merchant_paym_info: Option<MerchantPaymentInfo>,
    /// Where the payer is sent after payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Where status webhooks are delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_hook_url: Option<String>,
    /// Invoice lifetime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<i64>,
    /// Debit or hold; debit unless set.
    pub payment_type: PaymentType,
    /// QR register to bind the invoice to.
    pub qr_id: Option<String>,
    /// Submerchant code.
    pub code: Option<String>,
    /// Card tokenization options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_card_data: Option<SaveCardData>,
    /// Agent fee in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_fee_percent: Option<f64>,
    /// Employee receiving tips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips_employee_id: Option<String>,
    /// Payment page display mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
}

impl Validate for InvoiceCreateRequest {
    const NAME: &'static str = "InvoiceCreateRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("amount").required(&self.amount);
        if let Some(url) = &self.redirect_url {
            v.field("redirect_url").http_url(url);
        }
        if let Some(url) = &self.web_hook_url {
            v.field("web_hook_url").http_url(url);
        }
        if let Some(info) = &self.merchant_paym_info {
            v.nested("merchant_paym_info", info);
        }
    }
}

/// Response of `POST /api/merchant/invoice/create`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceCreateResponse {
    /// Identifier of the new invoice.
    #[serde_as(as = "DefaultOnNull")]
    pub invoice_id: String,
    /// Payment page URL to send the payer to.
    #[serde(rename = "pageUrl")]
    #[serde_as(as = "DefaultOnNull")]
    pub page_url: String,
}

/// Query of `GET /api/merchant/invoice/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetInvoiceStatusRequest {
    /// Invoice to look up.
    pub invoice_id: String,
}

impl Validate for GetInvoiceStatusRequest {
    const NAME: &'static str = "GetInvoiceStatusRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("invoice_id").required(&self.invoice_id);
    }
}

/// Response of `GET /api/merchant/invoice/status`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceStatusResponse {
    /// Invoice identifier.
    #[serde_as(as = "DefaultOnNull")]
    pub invoice_id: String,
    /// Current state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<InvoiceStatus>,
    /// Human-readable failure reason.
    pub failure_reason: Option<String>,
    /// Processing error code of a failed payment.
    pub err_code: Option<String>,
    /// Amount in minor units.
    #[serde_as(as = "DefaultOnNull")]
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    #[serde_as(as = "DefaultOnNull")]
    pub ccy: u16,
    /// Amount after cancellations, in minor units.
    pub final_amount: Option<i64>,
    /// Creation time (RFC 3339).
    pub created_date: Option<String>,
    /// Last modification time (RFC 3339).
    pub modified_date: Option<String>,
    /// Merchant order reference.
    pub reference: Option<String>,
    /// Payment purpose.
    pub destination: Option<String>,
    /// Cancellations applied to the invoice.
    #[serde_as(as = "DefaultOnNull")]
    pub cancel_list: Vec<CancelListItem>,
    /// Card and processing details.
    pub payment_info: Option<PaymentInfo>,
    /// Tokenization result.
    pub wallet_data: Option<WalletData>,
    /// Tips details.
    pub tips_info: Option<TipsInfo>,
}

/// A basket line being refunded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInvoiceItem {
    /// Item name.
    pub name: String,
    /// Merchant item code.
    pub code: String,
    /// Quantity.
    pub qty: i64,
    /// Amount in minor units.
    pub sum: i64,
    /// Item barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Receipt header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Receipt footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Ukrainian product classification code (UKTZED).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uktzed: Option<String>,
    /// Tax identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax: Vec<i64>,
}

impl Validate for CancelInvoiceItem {
    const NAME: &'static str = "CancelInvoiceItem";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("name").required(&self.name);
        v.field("code").required(&self.code);
        v.field("qty").required(&self.qty);
        v.field("sum").required(&self.sum);
    }
}

/// Body of `POST /api/merchant/invoice/cancel`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInvoiceRequest {
    /// Invoice to refund.
    pub invoice_id: String,
    /// Merchant reference of the cancellation.
    #[serde(rename = "extRef", skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    /// Partial refund amount in minor units; full refund if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Refunded basket lines.
    #[serde(default)]
    pub items: Vec<CancelInvoiceItem>,
}

impl Validate for CancelInvoiceRequest {
    const NAME: &'static str = "CancelInvoiceRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("invoice_id").required(&self.invoice_id);
        v.dive("items", &self.items);
    }
}

/// Response of `POST /api/merchant/invoice/cancel`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelInvoiceResponse {
    /// Cancellation state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<CancelStatus>,
    /// Creation time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub created_date: String,
    /// Last modification time (RFC 3339).
    #[serde_as(as = "DefaultOnNull")]
    pub modified_date: String,
}

/// Body of `POST /api/merchant/invoice/remove`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveInvoiceRequest {
    /// Invoice to invalidate.
    pub invoice_id: String,
}

impl Validate for RemoveInvoiceRequest {
    const NAME: &'static str = "RemoveInvoiceRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("invoice_id").required(&self.invoice_id);
    }
}

/// Body of `POST /api/merchant/invoice/finalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeHoldRequest {
    /// Held invoice to capture.
    pub invoice_id: String,
    /// Amount to capture in minor units; the whole hold if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Final basket, if it changed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<BasketOrder>,
}

impl Validate for FinalizeHoldRequest {
    const NAME: &'static str = "FinalizeHoldRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("invoice_id").required(&self.invoice_id);
        v.dive("items", &self.items);
    }
}

/// Response of `POST /api/merchant/invoice/finalize`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeHoldResponse {
    /// Finalization outcome.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<HoldFinalizationStatus>,
}

/// Query of `GET /api/merchant/invoice/receipt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetReceiptRequest {
    /// Paid invoice.
    pub invoice_id: String,
    /// Also send the receipt to this address.
    pub email: Option<String>,
}

impl Validate for GetReceiptRequest {
    const NAME: &'static str = "GetReceiptRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("invoice_id").required(&self.invoice_id);
        if let Some(email) = &self.email {
            v.field("email").email(email);
        }
    }
}

/// Response of `GET /api/merchant/invoice/receipt`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptResponse {
    /// Base64-encoded PDF receipt.
    #[serde_as(as = "DefaultOnNull")]
    pub file: String,
}

/// Query of `GET /api/merchant/invoice/fiscal-checks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetFiscalChecksRequest {
    /// Invoice whose checks are listed.
    pub invoice_id: String,
}

impl Validate for GetFiscalChecksRequest {
    const NAME: &'static str = "GetFiscalChecksRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("invoice_id").required(&self.invoice_id);
    }
}

/// A fiscal check issued for an invoice.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiscalCheck {
    /// Check identifier.
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    /// Sale or return.
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnError")]
    pub kind: Option<FiscalCheckType>,
    /// Processing state.
    #[serde_as(as = "DefaultOnError")]
    pub status: Option<FiscalCheckStatus>,
    /// Details of the processing state.
    pub status_description: Option<String>,
    /// Check URL at the tax authority.
    pub tax_url: Option<String>,
    /// Base64-encoded PDF of the check.
    pub file: Option<String>,
    /// Fiscalization provider.
    #[serde_as(as = "DefaultOnError")]
    pub fiscalization_source: Option<FiscalCheckSource>,
}

/// Response of `GET /api/merchant/invoice/fiscal-checks`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscalChecksResponse {
    /// Checks of the invoice.
    #[serde_as(as = "DefaultOnNull")]
    pub checks: Vec<FiscalCheck>,
}

impl Client {
    /// Creates an invoice and returns its payment page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without sending anything if the request is invalid,
    /// otherwise any transport or [`Error::Request`] failure.
    #[cfg_attr(feature = "telemetry", instrument(name = "mono_acquiring.create_invoice", skip_all, err))]
    pub async fn create_invoice(
        &self,
        request: &InvoiceCreateRequest,
    ) -> Result<InvoiceCreateResponse, Error> {
        request.validate()?;
        self.post(paths::INVOICE_CREATE, request).await
    }

    /// Returns the current state of an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the invoice id is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn get_invoice_status(
        &self,
        request: &GetInvoiceStatusRequest,
    ) -> Result<InvoiceStatusResponse, Error> {
        request.validate()?;
        let query = Query::from([("invoiceId", request.invoice_id.clone())]);
        self.get(paths::INVOICE_STATUS, &query).await
    }

    /// Refunds a paid invoice, fully or partially.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the request is invalid, otherwise any transport or
    /// [`Error::Request`] failure.
    #[cfg_attr(feature = "telemetry", instrument(name = "mono_acquiring.cancel_invoice", skip_all, err))]
    pub async fn cancel_invoice(
        &self,
        request: &CancelInvoiceRequest,
    ) -> Result<CancelInvoiceResponse, Error> {
        request.validate()?;
        self.post(paths::INVOICE_CANCEL, request).await
    }

    /// Invalidates an unpaid invoice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the invoice id is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn remove_invoice(&self, request: &RemoveInvoiceRequest) -> Result<(), Error> {
        request.validate()?;
        self.post_unit(paths::INVOICE_REMOVE, request).await
    }

    /// Captures a held invoice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the request is invalid, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn finalize_hold(
        &self,
        request: &FinalizeHoldRequest,
    ) -> Result<FinalizeHoldResponse, Error> {
        request.validate()?;
        self.post(paths::INVOICE_FINALIZE, request).await
    }

    /// Fetches the payment receipt of an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the request is invalid, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn get_receipt(&self, request: &GetReceiptRequest) -> Result<ReceiptResponse, Error> {
        request.validate()?;
        let mut query = Query::from([("invoiceId", request.invoice_id.clone())]);
        if let Some(email) = &request.email {
            query.insert("email", email.clone());
        }
        self.get(paths::INVOICE_RECEIPT, &query).await
    }

    /// Lists the fiscal checks issued for an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the invoice id is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn get_fiscal_checks(
        &self,
        request: &GetFiscalChecksRequest,
    ) -> Result<FiscalChecksResponse, Error> {
        request.validate()?;
        let query = Query::from([("invoiceId", request.invoice_id.clone())]);
        self.get(paths::INVOICE_FISCAL_CHECKS, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_client;
    use crate::error::ErrorKind;
    use crate::types::{PaymentMethod, PaymentSystem};
    use crate::validation::Constraint;
    use serde_json::json;
    use wiremock::matchers::{any, body_json, body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_invoice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/merchant/invoice/create"))
            .and(header("x-token", "test-token"))
            .and(body_partial_json(json!({"amount": 100})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "invoiceId": "p2_9ZgpZVsl3",
                "pageUrl": "https://pay.mbnk.biz/p2_9ZgpZVsl3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .create_invoice(&InvoiceCreateRequest {
                amount: 100,
                ..InvoiceCreateRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(response.invoice_id, "p2_9ZgpZVsl3");
        assert_eq!(response.page_url, "https://pay.mbnk.biz/p2_9ZgpZVsl3");
    }

    #[test]
    fn test_create_invoice_body_defaults() {
        let request = InvoiceCreateRequest {
            amount: 100,
            ..InvoiceCreateRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"amount": 100, "paymentType": "debit", "qrId": null, "code": null})
        );
    }

    #[tokio::test]
    async fn test_create_invoice_validation_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let request = InvoiceCreateRequest {
            redirect_url: Some("not a url".into()),
            web_hook_url: Some("ftp://example.com/hook".into()),
            merchant_paym_info: Some(MerchantPaymentInfo {
                customer_emails: vec!["nope".into()],
                ..MerchantPaymentInfo::default()
            }),
            ..InvoiceCreateRequest::default()
        };
        let err = test_client(&server).create_invoice(&request).await.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("InvoiceCreateRequest.amount"), Some(&Constraint::Required));
        assert_eq!(errors.get("InvoiceCreateRequest.redirect_url"), Some(&Constraint::HttpUrl));
        assert_eq!(errors.get("InvoiceCreateRequest.web_hook_url"), Some(&Constraint::HttpUrl));
        assert_eq!(
            errors.get("InvoiceCreateRequest.merchant_paym_info.customer_emails[0]"),
            Some(&Constraint::Email)
        );
    }

    #[tokio::test]
    async fn test_get_invoice_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/merchant/invoice/status"))
            .and(query_param("invoiceId", "p2_9ZgpZVsl3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "invoiceId": "p2_9ZgpZVsl3",
                "status": "success",
                "failureReason": "Неправильний CVV код",
                "errCode": "59",
                "amount": 4200,
                "ccy": 980,
                "finalAmount": 4200,
                "createdDate": "2025-07-17T12:00:00+03:00",
                "modifiedDate": "2025-07-17T13:00:00+03:00",
                "reference": "84d0070ee4e44667b31371d8f8813947",
                "destination": "Покупка щастя",
                "cancelList": [{
                    "status": "processing",
                    "amount": 4200,
                    "ccy": 980,
                    "createdDate": "2025-07-17T12:00:00+03:00",
                    "modifiedDate": "2025-07-17T12:00:00+03:00",
                    "approvalCode": "662476",
                    "rrn": "060189181768",
                    "extRef": "635ace02599849e981b2cd7a65f417fe"
                }],
                "paymentInfo": {
                    "maskedPan": "444403******1902",
                    "approvalCode": "662476",
                    "rrn": "060189181768",
                    "tranId": "13194036",
                    "terminal": "MI001088",
                    "bank": "Універсал Банк",
                    "paymentSystem": "visa",
                    "paymentMethod": "monobank",
                    "fee": null,
                    "country": "804",
                    "agentFee": null
                },
                "walletData": {
                    "cardToken": "67XZtXdR4NpKU3",
                    "walletId": "c1376a611e17b059aeaf96b73258da9c",
                    "status": null
                },
                "tipsInfo": {"employeeId": "e1234567890", "amount": 4200}
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .get_invoice_status(&GetInvoiceStatusRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.status, Some(InvoiceStatus::Success));
        assert_eq!(response.err_code.as_deref(), Some("59"));
        assert_eq!(response.ccy, 980);
        assert_eq!(response.cancel_list.len(), 1);
        assert_eq!(response.cancel_list[0].status, Some(CancelStatus::Processing));

        let payment = response.payment_info.unwrap();
        assert_eq!(payment.payment_system, Some(PaymentSystem::Visa));
        assert_eq!(payment.payment_method, Some(PaymentMethod::Monobank));
        assert_eq!(payment.fee, 0);

        let wallet = response.wallet_data.unwrap();
        assert_eq!(wallet.card_token, "67XZtXdR4NpKU3");
        assert_eq!(wallet.status, None);
        assert_eq!(response.tips_info.unwrap().employee_id, "e1234567890");
    }

    #[tokio::test]
    async fn test_get_invoice_status_unlisted_wire_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/merchant/invoice/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "invoiceId": "p2_9ZgpZVsl3",
                "status": "refunding",
                "amount": 4200,
                "ccy": 980,
                "cancelList": [{"status": "queued", "amount": 100, "ccy": 980}],
                "paymentInfo": {
                    "maskedPan": "444403******1902",
                    "paymentSystem": "prostir",
                    "paymentMethod": "crypto"
                }
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .get_invoice_status(&GetInvoiceStatusRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.status, None);
        assert_eq!(response.amount, 4200);
        assert_eq!(response.cancel_list[0].status, None);
        assert_eq!(response.cancel_list[0].amount, 100);
        let payment = response.payment_info.unwrap();
        assert_eq!(payment.payment_system, None);
        assert_eq!(payment.payment_method, None);
        assert_eq!(payment.masked_pan, "444403******1902");
    }

    #[tokio::test]
    async fn test_get_invoice_status_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/merchant/invoice/status"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errCode": "NOT_FOUND",
                "errText": "invoice not found"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_invoice_status(&GetInvoiceStatusRequest {
                invoice_id: "missing".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
        let request_error = err.request_error().unwrap();
        assert_eq!(request_error.code, "NOT_FOUND");
        assert_eq!(request_error.message, "invoice not found");
    }

    #[test]
    fn test_create_invoice_present_but_empty_urls() {
        let request = InvoiceCreateRequest {
            amount: 100,
            redirect_url: Some(String::new()),
            web_hook_url: Some("https://example.com/hook".into()),
            ..InvoiceCreateRequest::default()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("InvoiceCreateRequest.redirect_url"), Some(&Constraint::HttpUrl));
    }

    #[tokio::test]
    async fn test_cancel_invoice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/merchant/invoice/cancel"))
            .and(body_json(json!({
                "invoiceId": "p2_9ZgpZVsl3",
                "extRef": "refund-1",
                "amount": 2100,
                "items": []
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "processing",
                "createdDate": "2025-07-17T12:00:00+03:00",
                "modifiedDate": "2025-07-17T14:00:00+03:00"
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .cancel_invoice(&CancelInvoiceRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
                external_reference: Some("refund-1".into()),
                amount: Some(2100),
                items: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(response.status, Some(CancelStatus::Processing));
        assert_eq!(response.modified_date, "2025-07-17T14:00:00+03:00");
    }

    #[test]
    fn test_cancel_invoice_validation() {
        let request = CancelInvoiceRequest {
            items: vec![CancelInvoiceItem::default()],
            ..CancelInvoiceRequest::default()
        };
        let errors = request.validate().unwrap_err();
        let paths: Vec<&str> = errors.errors().iter().map(|error| error.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "CancelInvoiceRequest.invoice_id",
                "CancelInvoiceRequest.items[0].name",
                "CancelInvoiceRequest.items[0].code",
                "CancelInvoiceRequest.items[0].qty",
                "CancelInvoiceRequest.items[0].sum",
            ]
        );
    }

    #[tokio::test]
    async fn test_remove_invoice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/merchant/invoice/remove"))
            .and(body_json(json!({"invoiceId": "p2_9ZgpZVsl3"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .remove_invoice(&RemoveInvoiceRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_finalize_hold() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/merchant/invoice/finalize"))
            .and(body_json(json!({"invoiceId": "p2_9ZgpZVsl3", "amount": 4000})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .finalize_hold(&FinalizeHoldRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
                amount: Some(4000),
                items: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(response.status, Some(HoldFinalizationStatus::Success));
    }

    #[test]
    fn test_finalize_hold_validation() {
        let errors = FinalizeHoldRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("FinalizeHoldRequest.invoice_id"), Some(&Constraint::Required));
    }

    #[tokio::test]
    async fn test_get_receipt_with_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/merchant/invoice/receipt"))
            .and(query_param("invoiceId", "p2_9ZgpZVsl3"))
            .and(query_param("email", "buyer@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file": "JVBERi0xLjQK"})))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .get_receipt(&GetReceiptRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
                email: Some("buyer@example.com".into()),
            })
            .await
            .unwrap();
        assert_eq!(response.file, "JVBERi0xLjQK");
    }

    #[test]
    fn test_get_receipt_validation() {
        let errors = GetReceiptRequest {
            invoice_id: String::new(),
            email: Some("not-an-email".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("GetReceiptRequest.invoice_id"), Some(&Constraint::Required));
        assert_eq!(errors.get("GetReceiptRequest.email"), Some(&Constraint::Email));
    }

    #[test]
    fn test_get_receipt_present_but_empty_email() {
        let request = GetReceiptRequest {
            invoice_id: "p2_9ZgpZVsl3".into(),
            email: Some(String::new()),
        };
        assert_eq!(
            request.validate().unwrap_err().get("GetReceiptRequest.email"),
            Some(&Constraint::Email)
        );
        let request = GetReceiptRequest {
            email: None,
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[tokio::test]
    async fn test_get_fiscal_checks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/merchant/invoice/fiscal-checks"))
            .and(query_param("invoiceId", "p2_9ZgpZVsl3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "checks": [
                    {
                        "id": "a2fd4aef-cdb8-4e25-9b36-b6d4672c554d",
                        "type": "sale",
                        "status": "done",
                        "statusDescription": null,
                        "taxUrl": null,
                        "file": null,
                        "fiscalizationSource": "monopay"
                    },
                    {
                        "id": "12d10651-8105-4e2c-811f-ae6e32a2a588",
                        "type": "return",
                        "status": "failed",
                        "fiscalizationSource": "checkbox"
                    },
                    {
                        "id": "a2a13e1f-7373-4642-838c-be3bc8b67819",
                        "type": "return",
                        "status": "process",
                        "statusDescription": "test description",
                        "taxUrl": "https://cabinet.tax.gov.ua/cashregs/check",
                        "file": "CJFVBERi0xL....",
                        "fiscalizationSource": "vchasnokasa"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .get_fiscal_checks(&GetFiscalChecksRequest {
                invoice_id: "p2_9ZgpZVsl3".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.checks.len(), 3);
        assert_eq!(response.checks[0].kind, Some(FiscalCheckType::Sale));
        assert_eq!(response.checks[0].tax_url, None);
        assert_eq!(response.checks[1].status, Some(FiscalCheckStatus::Failed));
        assert_eq!(
            response.checks[2].fiscalization_source,
            Some(FiscalCheckSource::VchasnoKasa)
        );
        assert_eq!(response.checks[2].status_description.as_deref(), Some("test description"));
    }
}
