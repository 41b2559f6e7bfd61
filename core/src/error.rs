//! Error types for the Solr transport core.
//!
//! # Design
//! Configuration problems are detected before any I/O and carry no call
//! context. Every failure after that point is wrapped in `Contextual<E>`,
//! which pairs the original error with the `CallContext` of the call that
//! produced it. The wrapped error keeps its concrete type and is reported as
//! the `source()`, so callers can still match on the transport's own error
//! while seeing exactly which URI, body and headers were sent.

use thiserror::Error;

use crate::http::CallContext;

/// Invalid configuration or option combination, detected before sending.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid Solr URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid proxy URL {url:?}: {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot resolve request path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// A forced POST sends the params as its body, so a second body is
    /// ambiguous.
    #[error("don't send POST data when using method POST")]
    PostWithBody,
}

/// A response arrived but its status was not 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Solr responded with HTTP {status}")]
pub struct RequestError {
    pub status: u16,
}

/// An error together with the call it interrupted.
#[derive(Debug, Error)]
#[error("{error} ({} {})", .context.request.method(), .context.request.uri)]
pub struct Contextual<E>
where
    E: std::error::Error + 'static,
{
    #[source]
    error: E,
    context: CallContext,
}

impl<E> Contextual<E>
where
    E: std::error::Error + 'static,
{
    pub fn new(error: E, context: CallContext) -> Self {
        Self { error, context }
    }

    pub fn error(&self) -> &E {
        &self.error
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn into_parts(self) -> (E, CallContext) {
        (self.error, self.context)
    }
}

/// Every way a call can fail.
#[derive(Debug, Error)]
pub enum SolrError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The transport failed below the HTTP layer; no response exists.
    #[error(transparent)]
    Transport(Contextual<E>),

    /// The server answered with a status other than 200.
    #[error(transparent)]
    Request(Contextual<RequestError>),
}

impl<E> SolrError<E>
where
    E: std::error::Error + 'static,
{
    /// The call this error interrupted. `None` for configuration errors,
    /// which happen before a call exists.
    pub fn context(&self) -> Option<&CallContext> {
        match self {
            SolrError::Configuration(_) => None,
            SolrError::Transport(e) => Some(e.context()),
            SolrError::Request(e) => Some(e.context()),
        }
    }

    /// HTTP status of the offending response, if one was received.
    pub fn status(&self) -> Option<u16> {
        self.context().and_then(CallContext::status)
    }

    pub fn transport_error(&self) -> Option<&E> {
        match self {
            SolrError::Transport(e) => Some(e.error()),
            _ => None,
        }
    }
}
