//! HTTP-specific constants for the acquiring API.

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.monobank.ua/";

/// Header carrying the merchant API token.
pub const TOKEN_HEADER: &str = "X-Token";

/// Header identifying the integration (CMS) issuing the request.
pub const CMS_HEADER: &str = "X-Cms";

/// Header carrying the integration version.
pub const CMS_VERSION_HEADER: &str = "X-Cms-Version";

/// Value of [`CMS_HEADER`] when no integration name is configured.
pub const DEFAULT_CMS: &str = "rust";

/// Endpoint paths, relative to the base URL.
pub mod paths {
    /// `GET` invoice status.
    pub const INVOICE_STATUS: &str = "/api/merchant/invoice/status";
    /// `POST` invoice creation.
    pub const INVOICE_CREATE: &str = "/api/merchant/invoice/create";
    /// `POST` invoice cancellation (refund).
    pub const INVOICE_CANCEL: &str = "/api/merchant/invoice/cancel";
    /// `POST` invoice invalidation.
    pub const INVOICE_REMOVE: &str = "/api/merchant/invoice/remove";
    /// `POST` hold finalization.
    pub const INVOICE_FINALIZE: &str = "/api/merchant/invoice/finalize";
    /// `GET` payment receipt.
    pub const INVOICE_RECEIPT: &str = "/api/merchant/invoice/receipt";
    /// `GET` fiscal checks of an invoice.
    pub const INVOICE_FISCAL_CHECKS: &str = "/api/merchant/invoice/fiscal-checks";
    /// `POST` payment with raw card data.
    pub const INVOICE_PAYMENT_DIRECT: &str = "/api/merchant/invoice/payment-direct";
    /// `POST` synchronous payment (card, Apple Pay, Google Pay).
    pub const INVOICE_SYNC_PAYMENT: &str = "/api/merchant/invoice/sync-payment";
    /// `GET` webhook public key.
    pub const PUBKEY: &str = "/api/merchant/pubkey";
    /// `GET` merchant details.
    pub const DETAILS: &str = "/api/merchant/details";
    /// `GET` employee list.
    pub const EMPLOYEE_LIST: &str = "/api/merchant/employee/list";
    /// `GET` split receiver list.
    pub const SPLIT_RECEIVER_LIST: &str = "/api/merchant/split-receiver/list";
    /// `GET` submerchant list.
    pub const SUBMERCHANT_LIST: &str = "/api/merchant/submerchant/list";
    /// `GET` statement.
    pub const STATEMENT: &str = "/api/merchant/statement";
    /// `GET` QR register list.
    pub const QR_LIST: &str = "/api/merchant/qr/list";
    /// `GET` QR register details.
    pub const QR_DETAILS: &str = "/api/merchant/qr/details";
    /// `POST` QR amount reset.
    pub const QR_RESET_AMOUNT: &str = "/api/merchant/qr/reset-amount";
    /// `GET` tokenized cards of a wallet.
    pub const WALLET: &str = "/api/merchant/wallet";
    /// `DELETE` tokenized card.
    pub const WALLET_CARD: &str = "/api/merchant/wallet/card";
    /// `POST` payment by card token.
    pub const WALLET_PAYMENT: &str = "/api/merchant/wallet/payment";
}
