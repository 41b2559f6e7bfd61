//! Request/response records and the transport boundary.
//!
//! # Design
//! Requests and responses are plain data. The core builds a
//! `RequestContext`, hands it to a `Transport` and records what came back in
//! a `ResponseContext`; the pair travels together as a `CallContext`, both
//! on success and attached to errors. The transport owns every network
//! concern (pooling, TLS, timeouts) and only has to answer two calls.
//!
//! All records are `Serialize` so a failed call can be logged as JSON.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

/// Header name to value. Ordered so requests compare and print stably.
pub type Headers = BTreeMap<String, String>;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const XML_UTF8: &str = "text/xml; charset=utf-8";

/// The two HTTP methods this layer issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Everything that is sent for one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    /// Absolute target, query included.
    pub uri: Url,
    /// Present exactly when the request goes out as a POST.
    pub body: Option<String>,
    pub headers: Headers,
}

impl RequestContext {
    pub fn method(&self) -> Method {
        if self.body.is_some() {
            Method::Post
        } else {
            Method::Get
        }
    }
}

/// What the transport got back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseContext {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

/// A request paired with its response, if one was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallContext {
    pub request: RequestContext,
    /// `None` when the transport itself failed.
    pub response: Option<ResponseContext>,
}

impl CallContext {
    pub fn new(request: RequestContext) -> Self {
        Self {
            request,
            response: None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}

/// The network capability the dispatcher drives.
///
/// Implementations must return every HTTP status as an `Ok` response; only
/// failures below the HTTP layer (DNS, refused connection, malformed
/// response, timeout) are errors.
pub trait Transport {
    type Error: std::error::Error + 'static;

    fn get(&self, uri: &Url) -> Result<ResponseContext, Self::Error>;

    fn post(&self, uri: &Url, body: &str, headers: &Headers) -> Result<ResponseContext, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn get(&self, uri: &Url) -> Result<ResponseContext, Self::Error> {
        (**self).get(uri)
    }

    fn post(&self, uri: &Url, body: &str, headers: &Headers) -> Result<ResponseContext, Self::Error> {
        (**self).post(uri, body, headers)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Error = T::Error;

    fn get(&self, uri: &Url) -> Result<ResponseContext, Self::Error> {
        (**self).get(uri)
    }

    fn post(&self, uri: &Url, body: &str, headers: &Headers) -> Result<ResponseContext, Self::Error> {
        (**self).post(uri, body, headers)
    }
}
