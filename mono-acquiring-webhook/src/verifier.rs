//! ECDSA (P-256, SHA-256) verification of webhook request bodies.
//!
//! The verifier is built once from the base64-encoded PEM public key and then
//! checks any number of `(signature, body)` pairs. The body must be the raw bytes
//! exactly as received; re-serialized JSON generally does not verify.

use base64::prelude::*;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::der::{Decode, Document};
use p256::pkcs8::{DecodePublicKey, SubjectPublicKeyInfoRef};
use p256::{PublicKey, elliptic_curve};
use sha2::{Digest, Sha256};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::{KeyError, SignatureError};

/// HTTP header carrying the base64 webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Sign";

/// PEM label of a PKIX `SubjectPublicKeyInfo` block.
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Verifies webhook signatures against a fixed P-256 public key.
///
/// Holds only the parsed key, so it is cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Builds a verifier from a base64-encoded PEM public key.
    ///
    /// The input is the `key` field returned by `GET /api/merchant/pubkey`: base64 of a
    /// single `-----BEGIN PUBLIC KEY-----` block holding a PKIX-encoded P-256 key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if any decoding layer fails or the key is not a P-256
    /// elliptic-curve key.
    pub fn new(public_key: &str) -> Result<Self, KeyError> {
        let pem = BASE64_STANDARD.decode(public_key)?;
        let pem = std::str::from_utf8(&pem)?;

        let (label, document) = Document::from_pem(pem).map_err(KeyError::Pem)?;
        if label != PUBLIC_KEY_LABEL {
            return Err(KeyError::UnexpectedLabel(label.to_owned()));
        }

        let spki = SubjectPublicKeyInfoRef::from_der(document.as_bytes()).map_err(KeyError::Pkix)?;
        if spki.algorithm.oid != elliptic_curve::ALGORITHM_OID {
            return Err(KeyError::NotEllipticCurve(spki.algorithm.oid));
        }

        let key = PublicKey::from_public_key_der(document.as_bytes()).map_err(KeyError::Curve)?;
        Ok(Self {
            key: VerifyingKey::from(key),
        })
    }

    /// Returns the underlying verifying key.
    #[must_use]
    pub const fn verifying_key(&self) -> &VerifyingKey {
        &self.key
    }

    /// Checks a base64 ASN.1 DER signature over the SHA-256 digest of `body`.
    ///
    /// Returns `Ok(false)` for any signature that decodes from base64 but does not match,
    /// including signatures that are not valid DER.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Base64`] if `signature` is not valid base64.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mono_acquiring.webhook.verify", skip_all, fields(body.len = body.len()), err)
    )]
    pub fn verify(&self, signature: &str, body: &[u8]) -> Result<bool, SignatureError> {
        let raw = BASE64_STANDARD.decode(signature)?;
        let Ok(signature) = Signature::from_der(&raw) else {
            #[cfg(feature = "telemetry")]
            tracing::debug!("webhook signature is not valid DER");
            return Ok(false);
        };

        let digest = Sha256::digest(body);
        let matched = self.key.verify_prehash(&digest, &signature).is_ok();

        #[cfg(feature = "telemetry")]
        tracing::debug!(matched, "webhook signature checked");

        Ok(matched)
    }
}
