//! HTTP transport core for a Solr client.
//!
//! # Overview
//! Turns a logical call (path, params, optional body) into a concrete HTTP
//! request, dispatches it through a pluggable `Transport`, and returns the
//! request and response together as a `CallContext`. Failures come back as
//! `SolrError`, which carries the same context so callers can see exactly
//! what was sent and, when available, what the server answered.
//!
//! # Design
//! - `ClientConfig` is immutable and normalizes the base URL to end in `/`.
//! - `RequestBuilder` decides GET vs POST: a forced POST sends the query as a
//!   form body, an explicit body is sent as XML, otherwise it is a GET.
//! - `Connection::execute` makes exactly one transport call; only status 200
//!   is success.
//! - The transport does the I/O. `UreqTransport` (feature `ureq`) is the
//!   bundled blocking implementation; tests plug in their own.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
#[cfg(feature = "ureq")]
pub mod transport;

pub use builder::{RequestBuilder, RequestOptions};
pub use client::Connection;
pub use config::{ClientConfig, ClientOptions};
pub use error::{ConfigurationError, Contextual, RequestError, SolrError};
pub use http::{CallContext, Headers, Method, RequestContext, ResponseContext, Transport};
pub use params::{ParamValue, Params};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
