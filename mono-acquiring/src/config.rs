//! Client configuration.
//!
//! A [`Config`] is an immutable description of how to reach the acquiring API. It is
//! validated once, when a [`Client`](crate::Client) is constructed, and never consulted
//! again afterwards.

use std::time::Duration;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::constants::{CMS_HEADER, CMS_VERSION_HEADER, DEFAULT_BASE_URL, DEFAULT_CMS, TOKEN_HEADER};

/// Errors produced while validating a [`Config`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The API key is empty or whitespace.
    #[error("api key is blank")]
    BlankApiKey,
    /// The base URL is empty or whitespace.
    #[error("base URL is blank")]
    BlankBaseUrl,
    /// The base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected input.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The base URL parses but cannot carry a path (e.g. `mailto:`).
    #[error("base URL {0:?} cannot be used as a base")]
    NotABaseUrl(String),
    /// A configured value cannot be sent as an HTTP header value.
    #[error("invalid value for header {header}: {source}")]
    InvalidHeaderValue {
        /// Name of the header the value was meant for.
        header: &'static str,
        /// The underlying header error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },
}

/// Connection settings for the acquiring API.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use mono_acquiring::Config;
///
/// let config = Config::new("merchant-token")
///     .with_cms("my-shop")
///     .with_cms_version("1.4.2")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url(), "https://api.monobank.ua/");
/// ```
#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: String,
    cms: Option<String>,
    cms_version: Option<String>,
    timeout: Option<Duration>,
}

impl Config {
    /// Creates a configuration for the production API with the given merchant token.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            cms: None,
            cms_version: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (useful for sandboxes and test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the integration name sent in `X-Cms`.
    #[must_use]
    pub fn with_cms(mut self, cms: impl Into<String>) -> Self {
        self.cms = Some(cms.into());
        self
    }

    /// Sets the integration version sent in `X-Cms-Version`.
    #[must_use]
    pub fn with_cms_version(mut self, version: impl Into<String>) -> Self {
        self.cms_version = Some(version.into());
        self
    }

    /// Sets a deadline applied to every request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured base URL, unvalidated.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the integration name, falling back to the crate default.
    #[must_use]
    pub fn cms(&self) -> &str {
        self.cms.as_deref().filter(|cms| !cms.is_empty()).unwrap_or(DEFAULT_CMS)
    }

    /// Returns the integration version, falling back to a platform descriptor.
    #[must_use]
    pub fn cms_version(&self) -> String {
        match self.cms_version.as_deref() {
            Some(version) if !version.is_empty() => version.to_owned(),
            _ => default_cms_version(),
        }
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Checks the required fields and returns the parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API key or base URL is blank, or the base URL is
    /// malformed.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::BlankApiKey);
        }
        let raw = self.base_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::BlankBaseUrl);
        }
        let url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABaseUrl(raw.to_owned()));
        }
        Ok(url)
    }

    /// Builds the identification headers attached to every request.
    pub(crate) fn identification_headers(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::with_capacity(5);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut token = header_value(TOKEN_HEADER, &self.api_key)?;
        token.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-token"), token);
        headers.insert(
            HeaderName::from_static("x-cms"),
            header_value(CMS_HEADER, self.cms())?,
        );
        headers.insert(
            HeaderName::from_static("x-cms-version"),
            header_value(CMS_VERSION_HEADER, &self.cms_version())?,
        );
        Ok(headers)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("cms", &self.cms)
            .field("cms_version", &self.cms_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeaderValue { header, source })
}

/// Platform descriptor used when no integration version is configured.
fn default_cms_version() -> String {
    format!(
        "{} {} mono-acquiring/{}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION")
    )
}
