//! Blocking HTTP transport used by the provider.
//!
//! Kept behind a trait so tests can hand the provider canned responses
//! instead of touching the network.

use std::time::Duration;

use super::provider::DataError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport contract: one GET with query parameters.
///
/// Only failures to complete the exchange are errors here. A non-2xx status
/// is a normal response and is interpreted by the caller.
pub trait HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, DataError>;
}

/// Production transport backed by `reqwest::blocking`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client. `timeout` of `None` keeps reqwest's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, DataError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("stockchart/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DataError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, DataError> {
        let resp = self.client.get(url).query(query).send().map_err(|e| {
            if e.is_timeout() {
                DataError::Network(format!("request timeout: {}", e.without_url()))
            } else if e.is_connect() {
                DataError::Network(format!("connection failed: {}", e.without_url()))
            } else {
                DataError::Network(format!("request failed: {}", e.without_url()))
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| DataError::Network(format!("failed to read response body: {}", e.without_url())))?;

        Ok(HttpResponse { status, body })
    }
}
