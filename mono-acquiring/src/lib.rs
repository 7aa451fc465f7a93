#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async client for the monobank acquiring API.
//!
//! Every operation is a method on [`Client`]: it validates the typed request locally,
//! sends one request carrying the merchant's identification headers, and classifies the
//! reply. A `200`/`201` decodes into the typed response; any other status becomes a
//! [`RequestError`] with an [`ErrorKind`], the provider's error code and its message.
//!
//! # Example
//!
//! ```no_run
//! use mono_acquiring::api::invoice::{GetInvoiceStatusRequest, InvoiceCreateRequest};
//! use mono_acquiring::{Client, Config};
//!
//! # async fn run() -> Result<(), mono_acquiring::Error> {
//! let client = Client::new(Config::new("merchant-token"))?;
//! let invoice = client
//!     .create_invoice(&InvoiceCreateRequest {
//!         amount: 4200,
//!         ccy: Some(980),
//!         ..InvoiceCreateRequest::default()
//!     })
//!     .await?;
//! println!("pay at {}", invoice.page_url);
//!
//! let status = client
//!     .get_invoice_status(&GetInvoiceStatusRequest {
//!         invoice_id: invoice.invoice_id,
//!     })
//!     .await?;
//! println!("{:?}", status.status);
//! # Ok(())
//! # }
//! ```
//!
//! Webhook signatures are verified by the separate `mono-acquiring-webhook` crate, fed
//! with the key returned by [`Client::get_public_key`].
//!
//! # Modules
//!
//! - [`api`] - Operations and their request/response types
//! - [`client`] - The [`Client`] and its request/response envelope
//! - [`config`] - Client configuration
//! - [`constants`] - Base URL, header names and endpoint paths
//! - [`error`] - Error types and status classification
//! - [`models`] - Types shared between operations
//! - [`timestamp`] - Unix timestamps
//! - [`types`] - Closed string enumerations
//! - [`validation`] - Request validation
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod timestamp;
pub mod types;
pub mod validation;

pub use client::Client;
pub use config::{Config, ConfigError};
pub use error::{Error, ErrorKind, RequestError};
pub use timestamp::UnixTimestamp;
pub use validation::{Constraint, FieldError, Validate, ValidationErrors};
