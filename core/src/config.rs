//! Connection configuration: base endpoint and optional proxy.
//!
//! # Design
//! The default endpoint lives in `ClientConfig::default()` rather than in any
//! process-wide state. Both URIs are normalized to end with `/` at
//! construction so relative paths always resolve *under* the configured
//! endpoint (`select` against `.../solr/` is `.../solr/select`, not
//! `.../select`). A built `ClientConfig` is never mutated.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigurationError;

/// Endpoint used when no URL is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8983/solr/";

/// Environment variable read by [`ClientConfig::from_env`] for the endpoint.
pub const URL_ENV: &str = "SOLR_URL";

/// Environment variable read by [`ClientConfig::from_env`] for the proxy.
pub const PROXY_ENV: &str = "SOLR_PROXY";

/// Immutable endpoint configuration owned by a `Connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    url: Url,
    proxy: Option<Url>,
}

impl ClientConfig {
    /// Configure `url` as the base endpoint, with no proxy.
    pub fn new(url: &str) -> Result<Self, ConfigurationError> {
        let url = normalize(url).map_err(|source| ConfigurationError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self { url, proxy: None })
    }

    /// Route requests through `proxy`.
    pub fn with_proxy(mut self, proxy: &str) -> Result<Self, ConfigurationError> {
        let parsed = normalize(proxy).map_err(|source| ConfigurationError::InvalidProxy {
            url: proxy.to_string(),
            source,
        })?;
        self.proxy = Some(parsed);
        Ok(self)
    }

    /// Build from `SOLR_URL` / `SOLR_PROXY`, falling back to the defaults for
    /// whichever is unset.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        ClientOptions {
            url: std::env::var(URL_ENV).ok(),
            proxy: std::env::var(PROXY_ENV).ok(),
        }
        .try_into()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL is valid"),
            proxy: None,
        }
    }
}

/// Raw, deserializable configuration as it appears in a config file.
///
/// Convert with `ClientConfig::try_from(options)` to validate.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    pub url: Option<String>,
    pub proxy: Option<String>,
}

impl TryFrom<ClientOptions> for ClientConfig {
    type Error = ConfigurationError;

    fn try_from(options: ClientOptions) -> Result<Self, Self::Error> {
        let config = match options.url.as_deref() {
            Some(url) if !url.is_empty() => ClientConfig::new(url)?,
            _ => ClientConfig::default(),
        };
        match options.proxy.as_deref() {
            Some(proxy) if !proxy.is_empty() => config.with_proxy(proxy),
            _ => Ok(config),
        }
    }
}

/// Parse `raw` as an absolute base URL and make sure its path ends with `/`.
fn normalize(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
