//! The Solr connection: build a request, dispatch it, classify the result.
//!
//! # Design
//! `Connection` holds an immutable `ClientConfig` and a `Transport` and
//! carries no mutable state between calls, so one connection can serve
//! concurrent callers whenever its transport can. A call is a single
//! attempt: it is built, dispatched once, and either returns a
//! `CallContext` with a 200 response or fails with the context attached.

use url::Url;

use crate::builder::{RequestBuilder, RequestOptions};
use crate::config::ClientConfig;
use crate::error::{Contextual, RequestError, SolrError};
use crate::http::{CallContext, RequestContext, Transport};
use crate::params::Params;

/// Status accepted as success. Anything else is a `RequestError`.
pub const SUCCESS_STATUS: u16 = 200;

#[derive(Debug, Clone)]
pub struct Connection<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> Connection<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The normalized base endpoint.
    pub fn uri(&self) -> &Url {
        self.config.url()
    }

    pub fn proxy(&self) -> Option<&Url> {
        self.config.proxy()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request.
    ///
    /// ```no_run
    /// # use solr_http_core::{ClientConfig, Connection, Params, RequestOptions, UreqTransport};
    /// let config = ClientConfig::default();
    /// let solr = Connection::new(config.clone(), UreqTransport::new(&config)?);
    ///
    /// // GET select?q=*%3A*
    /// solr.request("select", &Params::from([("q", "*:*")]), None, RequestOptions::default())?;
    ///
    /// // POST an XML update
    /// solr.request("update", &Params::from([("wt", "xml")]), Some("<commit/>"), RequestOptions::default())?;
    ///
    /// // POST with the params as a form body
    /// solr.request("select", &Params::from([("q", "*:*")]), None, RequestOptions::post())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn request(
        &self,
        path: &str,
        params: &Params,
        body: Option<&str>,
        options: RequestOptions,
    ) -> Result<CallContext, SolrError<T::Error>> {
        self.send_and_receive(path, params, body, options)
    }

    /// Build then execute. Returns the full `CallContext` on a 200.
    pub fn send_and_receive(
        &self,
        path: &str,
        params: &Params,
        body: Option<&str>,
        options: RequestOptions,
    ) -> Result<CallContext, SolrError<T::Error>> {
        let request = self.build_request(path, params, body, options)?;
        self.execute(request)
    }

    /// Produce the request `request` would send, without sending it.
    pub fn build_request(
        &self,
        path: &str,
        params: &Params,
        body: Option<&str>,
        options: RequestOptions,
    ) -> Result<RequestContext, SolrError<T::Error>> {
        Ok(RequestBuilder::new(self.config.url()).build(path, params, body, options)?)
    }

    /// Dispatch a built request through the transport.
    pub fn execute(&self, request: RequestContext) -> Result<CallContext, SolrError<T::Error>> {
        let mut context = CallContext::new(request);
        let req = &context.request;

        tracing::debug!(target: "solr_http_core", method = %req.method(), uri = %req.uri, "dispatching");
        let result = match &req.body {
            Some(body) => self.transport.post(&req.uri, body, &req.headers),
            None => self.transport.get(&req.uri),
        };

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    target: "solr_http_core",
                    uri = %context.request.uri,
                    error = %error,
                    "transport failed"
                );
                return Err(SolrError::Transport(Contextual::new(error, context)));
            }
        };

        let status = response.status;
        context.response = Some(response);
        if status != SUCCESS_STATUS {
            tracing::warn!(target: "solr_http_core", status, uri = %context.request.uri, "non-success status");
            return Err(SolrError::Request(Contextual::new(RequestError { status }, context)));
        }
        Ok(context)
    }
}
