//! Saved cards ("wallet") and payments against their tokens.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::api::payment::PaymentResponse;
use crate::client::{Client, Query};
use crate::constants::paths;
use crate::error::Error;
use crate::models::MerchantPaymentInfo;
use crate::types::{InitiationKind, PaymentType};
use crate::validation::{Validate, Validator};

/// Query of `GET /api/merchant/wallet`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetWalletCardsRequest {
    /// Wallet whose cards are listed.
    pub wallet_id: String,
}

impl Validate for GetWalletCardsRequest {
    const NAME: &'static str = "GetWalletCardsRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("wallet_id").required(&self.wallet_id);
    }
}

/// A card saved in a wallet.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletCard {
    /// Token to pay with.
    #[serde_as(as = "DefaultOnNull")]
    pub card_token: String,
    /// Masked card number.
    #[serde_as(as = "DefaultOnNull")]
    pub masked_pan: String,
    /// Issuing country (ISO 3166-1 numeric).
    #[serde_as(as = "DefaultOnNull")]
    pub country: String,
}

/// Response of `GET /api/merchant/wallet`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletCardsResponse {
    /// Saved cards.
    #[serde_as(as = "DefaultOnNull")]
    pub wallet: Vec<WalletCard>,
}

/// Query of `DELETE /api/merchant/wallet/card`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveWalletCardRequest {
    /// Token of the card to remove.
    pub card_token: String,
}

impl Validate for RemoveWalletCardRequest {
    const NAME: &'static str = "RemoveWalletCardRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("card_token").required(&self.card_token);
    }
}

/// Body of `POST /api/merchant/wallet/payment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPaymentRequest {
    /// Token of the saved card.
    pub card_token: String,
    /// Amount in minor units.
    pub amount: i64,
    /// ISO 4217 numeric currency code.
    pub ccy: u16,
    /// Who initiated the payment.
    pub initiation_kind: InitiationKind,
    /// Merchant-side payment description.
    #[serde(rename = "merchantPaymInfo", skip_serializing_if = "Option::is_none")]
    pub merchant_paym_info: Option<MerchantPaymentInfo>,
    /// Where the payer is sent after 3-D Secure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Where status webhooks are delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_hook_url: Option<String>,
    /// Debit or hold; debit unless set.
    #[serde(default)]
    pub payment_type: PaymentType,
}

impl TokenPaymentRequest {
    /// Creates a debit request with no optional fields set.
    #[must_use]
    pub fn new(
        card_token: impl Into<String>,
        amount: i64,
        ccy: u16,
        initiation_kind: InitiationKind,
    ) -> Self {
        Self {
            card_token: card_token.into(),
            amount,
            ccy,
            initiation_kind,
            merchant_paym_info: None,
            redirect_url: None,
            web_hook_url: None,
            payment_type: PaymentType::default(),
        }
    }
}

impl Validate for TokenPaymentRequest {
    const NAME: &'static str = "TokenPaymentRequest";

    fn validate_fields(&self, v: &mut Validator<'_>) {
        v.field("card_token").required(&self.card_token);
        v.field("amount").required(&self.amount);
        v.field("ccy").required(&self.ccy).iso4217_numeric(self.ccy);
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

impl Client {
    /// Lists the cards saved in a wallet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the wallet id is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn get_wallet_cards(
        &self,
        request: &GetWalletCardsRequest,
    ) -> Result<WalletCardsResponse, Error> {
        request.validate()?;
        let query = Query::from([("walletId", request.wallet_id.clone())]);
        self.get(paths::WALLET, &query).await
    }

    /// Removes a saved card.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the card token is empty, otherwise any transport or
    /// [`Error::Request`] failure.
    pub async fn remove_wallet_card(&self, request: &RemoveWalletCardRequest) -> Result<(), Error> {
        request.validate()?;
        let query = Query::from([("cardToken", request.card_token.clone())]);
        self.delete_unit(paths::WALLET_CARD, &query).await
    }

    /// Charges a saved card.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without sending anything if the request is invalid,
    /// otherwise any transport or [`Error::Request`] failure.
    #[cfg_attr(feature = "telemetry", instrument(name = "mono_acquiring.token_payment", skip_all, err))]
    pub async fn token_payment(
        &self,
        request: &TokenPaymentRequest,
    ) -> Result<PaymentResponse, Error> {
        request.validate()?;
        self.post(paths::WALLET_PAYMENT, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_client;
    use crate::types::PaymentStatus;
    use crate::validation::Constraint;
    use serde_json::json;
    use wiremock::matchers::{any, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_wallet_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/merchant/wallet"))
            .and(query_param("walletId", "c1376a611e17b059aeaf96b73258da9c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "wallet": [
                    {"cardToken": "67XZtXdR4NpKU3", "maskedPan": "424242******4242", "country": "804"},
                    {"cardToken": "8YbNFa2DhJ6pP2", "maskedPan": "537541******1234", "country": null}
                ]
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .get_wallet_cards(&GetWalletCardsRequest {
                wallet_id: "c1376a611e17b059aeaf96b73258da9c".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.wallet.len(), 2);
        assert_eq!(response.wallet[0].masked_pan, "424242******4242");
        assert_eq!(response.wallet[1].country, "");
    }

    #[tokio::test]
    async fn test_remove_wallet_card_uses_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/merchant/wallet/card"))
            .and(query_param("cardToken", "67XZtXdR4NpKU3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .remove_wallet_card(&RemoveWalletCardRequest {
                card_token: "67XZtXdR4NpKU3".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_wallet_card_requires_token() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = test_client(&server)
            .remove_wallet_card(&RemoveWalletCardRequest::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().get("RemoveWalletCardRequest.card_token"),
            Some(&Constraint::Required)
        );
    }

    #[tokio::test]
    async fn test_token_payment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/merchant/wallet/payment"))
            .and(body_json(json!({
                "cardToken": "67XZtXdR4NpKU3",
                "amount": 4200,
                "ccy": 980,
                "initiationKind": "merchant",
                "webHookUrl": "https://example.com/mono/acquiring/webhook",
                "paymentType": "debit"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "invoiceId": "2210012MPLYwJjVUzchj",
                "tdsUrl": null,
                "status": "processing",
                "amount": 4200,
                "ccy": 980,
                "createdDate": "2025-07-17T12:00:00+03:00",
                "modifiedDate": "2025-07-17T12:00:00+03:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut request = TokenPaymentRequest::new("67XZtXdR4NpKU3", 4200, 980, InitiationKind::Merchant);
        request.web_hook_url = Some("https://example.com/mono/acquiring/webhook".into());
        let response = test_client(&server).token_payment(&request).await.unwrap();
        assert_eq!(response.status, Some(PaymentStatus::Processing));
        assert_eq!(response.tds_url, None);
    }

    #[test]
    fn test_token_payment_validation() {
        let mut request = TokenPaymentRequest::new("", 0, 1, InitiationKind::Client);
        request.redirect_url = Some("javascript:alert(1)".into());
        let errors = request.validate().unwrap_err();
        let rendered: Vec<String> = errors.errors().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "TokenPaymentRequest.card_token: required",
                "TokenPaymentRequest.amount: required",
                "TokenPaymentRequest.ccy: iso4217_numeric",
                "TokenPaymentRequest.redirect_url: http_url",
            ]
        );
    }
}
