//! The acquiring API client and its shared request/response envelope.
//!
//! Every operation goes through the same two steps: `build_request` turns a
//! method, path, query and optional JSON body into a request carrying the identification
//! headers, and `round_trip` executes it, fully reads the body and either hands
//! back the bytes of a `200`/`201` response or classifies the failure into a
//! [`RequestError`].
//!
//! ## Cancellation
//!
//! Operations are plain futures. Dropping one aborts the in-flight request. A deadline
//! configured with [`Config::with_timeout`] applies to each request and surfaces as a
//! transport error ([`Error::is_timeout`]).

use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::Config;
use crate::error::{Error, RequestError};

/// Query parameters of a request. Keys are kept sorted, so the encoded query string is
/// always in alphabetical key order.
pub(crate) type Query = BTreeMap<&'static str, String>;

/// Async client for the acquiring API.
///
/// Cheap to clone; clones share the underlying connection pool. Holds no per-call state,
/// so one instance can serve any number of concurrent calls.
#[derive(Clone, Debug)]
pub struct Client {
    /// Shared reqwest HTTP client
    http: reqwest::Client,
    /// Validated base URL; each operation replaces its path
    base_url: Url,
    /// Identification headers sent with every request
    headers: HeaderMap,
    /// Optional per-request deadline
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client with a default `reqwest` HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client on top of a caller-supplied `reqwest` HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = config.validate()?;
        let headers = config.identification_headers()?;
        Ok(Self {
            http,
            base_url,
            headers,
            timeout: config.timeout(),
        })
    }

    /// Returns the base URL requests are sent to.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the identification headers attached to every request.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured per-request timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds a request for `path` with the identification headers, the query string and
    /// an optional pre-encoded JSON body.
    pub(crate) fn build_request(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Request, Error> {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(None);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let context = format!("{method} {path}");
        let mut req = self.http.request(method, url).headers(self.headers.clone());
        if let Some(body) = body {
            req = req.body(body);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        req.build().map_err(|source| Error::Http { context, source })
    }

    /// Executes a request and returns the body of a `200`/`201` response.
    ///
    /// The body is always read to the end, so the connection is released on every path.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "mono_acquiring.request",
            skip_all,
            fields(
                http.method = %request.method(),
                url.path = request.url().path(),
                http.status_code = tracing::field::Empty,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub(crate) async fn round_trip(&self, request: reqwest::Request) -> Result<Vec<u8>, Error> {
        let context = format!("{} {}", request.method(), request.url().path());
        let result = self.execute(request, context).await;
        record_result_on_span(&result);
        result
    }

    async fn execute(&self, request: reqwest::Request, context: String) -> Result<Vec<u8>, Error> {
        let http_response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(source) => return Err(Error::Http { context, source }),
        };

        let status = http_response.status();
        #[cfg(feature = "telemetry")]
        Span::current().record("http.status_code", status.as_u16());

        let body = match http_response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(Error::ResponseBodyRead { context, source }),
        };

        if status == StatusCode::OK || status == StatusCode::CREATED {
            Ok(body.to_vec())
        } else {
            Err(RequestError::from_response(status, &body).into())
        }
    }

    /// Sends a request and decodes the success body into `R`.
    async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &'static str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<R, Error> {
        let context = format!("{method} {path}");
        let request = self.build_request(method, path, query, body)?;
        let bytes = self.round_trip(request).await?;
        serde_json::from_slice(&bytes).map_err(|source| Error::JsonDeserialization { context, source })
    }

    /// Sends a request whose success body is ignored.
    async fn send_unit(
        &self,
        method: Method,
        path: &'static str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<(), Error> {
        let request = self.build_request(method, path, query, body)?;
        self.round_trip(request).await.map(drop)
    }

    /// `GET` with a query string.
    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        path: &'static str,
        query: &Query,
    ) -> Result<R, Error> {
        self.send(Method::GET, path, query, None).await
    }

    /// `POST` with a JSON body.
    pub(crate) async fn post<T, R>(&self, path: &'static str, payload: &T) -> Result<R, Error>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(path, payload)?;
        self.send(Method::POST, path, &Query::new(), Some(body)).await
    }

    /// `POST` with a JSON body and no response payload.
    pub(crate) async fn post_unit<T>(&self, path: &'static str, payload: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let body = encode_body(path, payload)?;
        self.send_unit(Method::POST, path, &Query::new(), Some(body)).await
    }

    /// `DELETE` with a query string and no response payload.
    pub(crate) async fn delete_unit(&self, path: &'static str, query: &Query) -> Result<(), Error> {
        self.send_unit(Method::DELETE, path, query, None).await
    }
}

fn encode_body<T: Serialize + ?Sized>(path: &'static str, payload: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(payload).map_err(|source| Error::JsonSerialization {
        context: format!("POST {path}"),
        source,
    })
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to acquiring API failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
