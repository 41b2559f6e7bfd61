//! Turns a path, params and optional body into a `RequestContext`.
//!
//! # Design
//! `RequestBuilder` borrows the configured base URI and does no I/O. The
//! GET/POST decision is made here, once, and recorded in the shape of the
//! request: a request with a body is a POST, one without is a GET.
//!
//! A forced POST copies the merged query string into the body while leaving
//! it on the URI as well. Servers that only read form-encoded POST bodies see
//! the params, and the URI still shows what was asked for.

use url::Url;

use crate::error::ConfigurationError;
use crate::http::{Headers, Method, RequestContext, CONTENT_TYPE, FORM_URLENCODED, XML_UTF8};
use crate::params::Params;

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// `Some(Method::Post)` forces a POST with the params as the body.
    pub method: Option<Method>,
}

impl RequestOptions {
    pub fn post() -> Self {
        Self {
            method: Some(Method::Post),
        }
    }

    fn forces_post(&self) -> bool {
        self.method == Some(Method::Post)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    base: &'a Url,
}

impl<'a> RequestBuilder<'a> {
    /// `base` must be absolute and end with `/`; `ClientConfig` guarantees both.
    pub fn new(base: &'a Url) -> Self {
        Self { base }
    }

    pub fn build(
        &self,
        path: &str,
        params: &Params,
        body: Option<&str>,
        options: RequestOptions,
    ) -> Result<RequestContext, ConfigurationError> {
        let uri = self.merge(path, params)?;
        let body = body.filter(|b| !b.is_empty());

        let request = if options.forces_post() {
            if body.is_some() {
                return Err(ConfigurationError::PostWithBody);
            }
            let query = uri.query().unwrap_or_default().to_string();
            RequestContext {
                uri,
                body: Some(query),
                headers: Headers::from([(CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string())]),
            }
        } else if let Some(body) = body {
            RequestContext {
                uri,
                body: Some(body.to_string()),
                headers: Headers::from([(CONTENT_TYPE.to_string(), XML_UTF8.to_string())]),
            }
        } else {
            RequestContext {
                uri,
                body: None,
                headers: Headers::new(),
            }
        };

        tracing::debug!(
            target: "solr_http_core",
            method = %request.method(),
            uri = %request.uri,
            "built request"
        );
        Ok(request)
    }

    /// Resolve `path` against the base and append `params` to its query.
    fn merge(&self, path: &str, params: &Params) -> Result<Url, ConfigurationError> {
        let mut uri = self.base.join(path).map_err(|source| ConfigurationError::InvalidPath {
            path: path.to_string(),
            source,
        })?;

        let pairs = params.pairs();
        if !pairs.is_empty() {
            let mut query = uri.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }
        Ok(uri)
    }
}
