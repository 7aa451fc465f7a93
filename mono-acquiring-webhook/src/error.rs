//! Error types for webhook signature verification.

use p256::pkcs8::{ObjectIdentifier, der, spki};

/// Errors that can occur while building a [`SignatureVerifier`](crate::SignatureVerifier)
/// from a base64-encoded PEM public key.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The outer base64 layer could not be decoded.
    #[error("public key is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes are not UTF-8 text and cannot hold a PEM block.
    #[error("public key is not PEM text: {0}")]
    NotText(#[from] std::str::Utf8Error),
    /// The text does not contain exactly one well-formed PEM block.
    #[error("failed to decode PEM block containing the public key: {0}")]
    Pem(#[source] der::Error),
    /// The PEM block is not labelled as a public key.
    #[error("unexpected PEM label {0:?}, expected \"PUBLIC KEY\"")]
    UnexpectedLabel(String),
    /// The PEM block is not a PKIX `SubjectPublicKeyInfo` structure.
    #[error("failed to parse PKIX public key: {0}")]
    Pkix(#[source] der::Error),
    /// The key uses an algorithm other than elliptic-curve public keys.
    #[error("public key algorithm {0} is not elliptic-curve")]
    NotEllipticCurve(ObjectIdentifier),
    /// The key is elliptic-curve but not a valid P-256 point.
    #[error("failed to parse P-256 public key: {0}")]
    Curve(#[source] spki::Error),
}

/// Errors that can occur while verifying a webhook signature.
///
/// A well-formed signature that does not match is not an error; it verifies to `false`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SignatureError {
    /// The signature is not valid base64.
    #[error("signature is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
