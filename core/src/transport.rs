//! Blocking `Transport` backed by ureq.
//!
//! Status-as-error is switched off so 4xx/5xx responses come back as data
//! and the dispatcher decides what counts as failure. Only the configured
//! proxy is used. Response bodies are read in full, with no size cap unless
//! one is set, and decoded lossily so a 200 is never turned into an error by
//! its payload. Pooling, TLS and timeouts are ureq's defaults.

use ureq::http::Response;
use ureq::{Agent, Body, Proxy};
use url::Url;

use crate::config::ClientConfig;
use crate::http::{Headers, ResponseContext, Transport};

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ureq::Error> {
        // The configured proxy replaces any proxy ureq would pick up from the
        // environment.
        let proxy = config.proxy().map(|p| Proxy::new(p.as_str())).transpose()?;
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .proxy(proxy)
            .build()
            .new_agent();
        Ok(Self::with_agent(agent))
    }

    /// Wrap an agent configured elsewhere. It must not treat HTTP statuses
    /// as errors.
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }

    /// Fail responses whose body exceeds `bytes`. Unlimited by default.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    fn read_response(&self, mut response: Response<Body>) -> Result<ResponseContext, ureq::Error> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        Ok(ResponseContext { status, headers, body })
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn get(&self, uri: &Url) -> Result<ResponseContext, ureq::Error> {
        let response = self.agent.get(uri.as_str()).call()?;
        self.read_response(response)
    }

    fn post(&self, uri: &Url, body: &str, headers: &Headers) -> Result<ResponseContext, ureq::Error> {
        let mut request = self.agent.post(uri.as_str());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send(body.as_bytes())?;
        self.read_response(response)
    }
}
