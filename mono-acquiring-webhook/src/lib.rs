#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Webhook authentication for the monobank acquiring API.
//!
//! The acquiring service signs every webhook call with ECDSA over SHA-256 and sends the
//! base64 DER signature in the `X-Sign` header. [`SignatureVerifier`] checks those
//! signatures against the merchant's public key, which is obtained out of band
//! (e.g. via `GET /api/merchant/pubkey`).
//!
//! # Example
//!
//! ```no_run
//! use mono_acquiring_webhook::SignatureVerifier;
//!
//! # fn handle(public_key: &str, x_sign: &str, body: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = SignatureVerifier::new(public_key)?;
//! if verifier.verify(x_sign, body)? {
//!     // trusted payload
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`error`] - Key and signature decoding errors
//! - [`verifier`] - The [`SignatureVerifier`] itself
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation

pub mod error;
pub mod verifier;

pub use error::{KeyError, SignatureError};
pub use verifier::{SIGNATURE_HEADER, SignatureVerifier};
