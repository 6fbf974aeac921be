//! HTTP transport types and the default blocking transport.
//!
//! # Design
//! Requests and responses are plain data. `DocsvaultClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the `HttpResponse`
//! that comes back, so the request/response logic stays testable without a
//! network. `UreqTransport` is the production transport; any
//! `Fn(&HttpRequest) -> Result<HttpResponse, TransportError>` closure also
//! works, which is how unit tests feed canned envelopes.
//!
//! Every Docsvault endpoint takes its parameters in the query string, for POST
//! as well as GET. Values are passed through untouched; percent-encoding is
//! the transport's job.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Value of the first query parameter named `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response (connection refused, timeout, body
/// not readable as text, ...).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx statuses as data, not as errors; the
/// client classifies statuses itself.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Agent with no timeout of its own; the OS and server decide.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Agent that aborts any call running longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.path);
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.path);
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder.send_empty()
            }
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        // Only a 200 body is ever parsed; an unreadable error page must not
        // mask its status code.
        let body = if status == 200 {
            response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError(e.to_string()))?
        } else {
            response.body_mut().read_to_string().unwrap_or_default()
        };

        Ok(HttpResponse { status, body })
    }
}
