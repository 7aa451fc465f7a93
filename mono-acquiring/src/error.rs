//! Error types for the acquiring client.
//!
//! Every operation returns [`Error`]. Its variants fall into four groups:
//!
//! - configuration problems ([`Error::Config`]), raised while building a client
//! - local validation failures ([`Error::Validation`]), raised before any network call
//! - transport failures ([`Error::is_transport`]): connection, timeout, body read and
//!   JSON encoding or decoding problems
//! - remote failures ([`Error::Request`]), classified by HTTP status into [`ErrorKind`]

use std::fmt;

use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ConfigError;
use crate::validation::ValidationErrors;

/// Classification of a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `400 Bad Request`.
    BadRequest,
    /// `403 Forbidden`.
    Forbidden,
    /// `404 Not Found`.
    NotFound,
    /// `405 Method Not Allowed`.
    MethodNotAllowed,
    /// `429 Too Many Requests`.
    TooManyRequests,
    /// `500 Internal Server Error`.
    Internal,
    /// Any other non-success status.
    Unexpected,
}

impl ErrorKind {
    /// Classifies a status by exact value. Statuses outside the table are [`Self::Unexpected`].
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            429 => Self::TooManyRequests,
            500 => Self::Internal,
            _ => Self::Unexpected,
        }
    }

    /// Returns a stable snake-case name for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::TooManyRequests => "too_many_requests",
            Self::Internal => "internal",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by the API through a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({status}): code={code:?} message={message:?}")]
pub struct RequestError {
    /// Classified kind.
    pub kind: ErrorKind,
    /// Exact HTTP status returned.
    pub status: StatusCode,
    /// Provider machine error code (`errCode`), possibly empty.
    pub code: String,
    /// Human-readable description (`errText`), or the body decode failure.
    pub message: String,
}

/// Conventional error envelope of non-success responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "errCode", default)]
    code: Option<String>,
    #[serde(rename = "errText", default)]
    text: Option<String>,
}

impl RequestError {
    /// Classifies a non-success response from its status and raw body.
    ///
    /// If the body is not a JSON error envelope, `message` carries the decode failure and
    /// `code` keeps a string `errCode` if the body still has one. A `null` body is an empty
    /// envelope.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let (code, message) = match serde_json::from_slice::<Option<ErrorBody>>(body) {
            Ok(body) => {
                let body = body.unwrap_or_default();
                (body.code.unwrap_or_default(), body.text.unwrap_or_default())
            }
            Err(err) => (salvage_code(body), err.to_string()),
        };
        Self {
            kind: ErrorKind::from_status(status),
            status,
            code,
            message,
        }
    }
}

fn salvage_code(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("errCode")?.as_str().map(str::to_owned))
        .unwrap_or_default()
}

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The request failed local validation and was not sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// HTTP transport error (connect, DNS, timeout, request construction).
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context, e.g. `"GET /api/merchant/details"`.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The response body could not be read.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The request body could not be encoded.
    #[error("Failed to serialize JSON: {context}: {source}")]
    JsonSerialization {
        /// Human-readable context.
        context: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A success response could not be decoded into the expected type.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The API answered with a non-success status.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl Error {
    /// Returns `true` for local network, I/O and serialization failures.
    ///
    /// These are never classified into [`ErrorKind`]; callers may choose to retry them.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::ResponseBodyRead { .. }
                | Self::JsonSerialization { .. }
                | Self::JsonDeserialization { .. }
        )
    }

    /// Returns `true` if the request exceeded its deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http { source, .. } | Self::ResponseBodyRead { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Returns the remote failure, if this is one.
    #[must_use]
    pub const fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the classified kind of a remote failure.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Request(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Returns the validation violations, if the request was rejected locally.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_table() {
        let cases = [
            (400, ErrorKind::BadRequest),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (405, ErrorKind::MethodNotAllowed),
            (429, ErrorKind::TooManyRequests),
            (500, ErrorKind::Internal),
            (401, ErrorKind::Unexpected),
            (402, ErrorKind::Unexpected),
            (409, ErrorKind::Unexpected),
            (502, ErrorKind::Unexpected),
            (503, ErrorKind::Unexpected),
            (302, ErrorKind::Unexpected),
        ];
        for (status, kind) in cases {
            let status = StatusCode::from_u16(status).unwrap();
            assert_eq!(ErrorKind::from_status(status), kind, "{status}");
        }
    }

    #[test]
    fn test_from_response_extracts_envelope() {
        let err = RequestError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"errCode":"BAD_REQUEST","errText":"empty 'amount'"}"#,
        );
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "BAD_REQUEST");
        assert_eq!(err.message, "empty 'amount'");
    }

    #[test]
    fn test_from_response_tolerates_missing_fields() {
        let err = RequestError::from_response(StatusCode::NOT_FOUND, br#"{"errText":"no invoice"}"#);
        assert_eq!(err.code, "");
        assert_eq!(err.message, "no invoice");

        let err = RequestError::from_response(StatusCode::NOT_FOUND, b"{}");
        assert_eq!(err.code, "");
        assert_eq!(err.message, "");
    }

    #[test]
    fn test_from_response_reports_undecodable_body() {
        let err = RequestError::from_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err.kind, ErrorKind::Unexpected);
        assert_eq!(err.code, "");
        assert!(!err.message.is_empty());

        let err = RequestError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_from_response_keeps_code_of_mistyped_envelope() {
        let err = RequestError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"errCode":"BAD_REQUEST","errText":42}"#,
        );
        assert_eq!(err.code, "BAD_REQUEST");
        assert!(err.message.contains("invalid type"), "{}", err.message);

        let err = RequestError::from_response(StatusCode::BAD_REQUEST, br#"{"errCode":7,"errText":"x"}"#);
        assert_eq!(err.code, "");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_from_response_null_body_is_empty_envelope() {
        let err = RequestError::from_response(StatusCode::TOO_MANY_REQUESTS, b"null");
        assert_eq!(err.kind, ErrorKind::TooManyRequests);
        assert_eq!(err.code, "");
        assert_eq!(err.message, "");
    }

    #[test]
    fn test_error_accessors() {
        let err = Error::from(RequestError::from_response(StatusCode::FORBIDDEN, b"{}"));
        assert_eq!(err.kind(), Some(ErrorKind::Forbidden));
        assert!(!err.is_transport());
        assert!(err.request_error().is_some());

        let err = Error::from(ConfigError::BlankApiKey);
        assert_eq!(err.kind(), None);
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "api key is blank");
    }
}
