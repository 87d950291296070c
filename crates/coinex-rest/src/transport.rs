//! HTTP transport abstraction
//!
//! The signed request pipeline talks to the network only through
//! [`HttpTransport`]. Production code uses [`ReqwestTransport`]; tests inject
//! a recording stub so requests can be inspected without a server.

use crate::error_codes::RecoveryStrategy;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("coinex-rest/", env!("CARGO_PKG_VERSION"));

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection could not be established or was reset
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Server answered with a status other than 200
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, lossily decoded
        body: String,
    },
}

impl TransportError {
    pub(crate) fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Connect(_) | Self::Timeout | Self::Body(_) => RecoveryStrategy::service_retry(),
            Self::Status { status: 429, .. } => RecoveryStrategy::rate_limit_backoff(),
            Self::Status { status, .. } if *status >= 500 => RecoveryStrategy::service_retry(),
            Self::Status { .. } => RecoveryStrategy::Fatal,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Connect(err.to_string())
        }
    }
}

/// A fully built, signed request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// First header value with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as received from the wire
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Trait for HTTP transport abstraction
///
/// Implementations perform exactly one network exchange per call and must
/// not interpret the status code.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, len = body.len(), "Received response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse("https://api.coinex.com/v2/spot/market").unwrap(),
            headers: vec![("X-COINEX-KEY", "abc".to_string())],
            body: Vec::new(),
        };

        assert_eq!(request.header("x-coinex-key"), Some("abc"));
        assert_eq!(request.header("X-COINEX-SIGN"), None);
    }

    #[test]
    fn test_status_recovery() {
        let limited = TransportError::Status {
            status: 429,
            body: String::new(),
        };
        assert!(matches!(
            limited.recovery_strategy(),
            RecoveryStrategy::Backoff { .. }
        ));

        let gateway = TransportError::Status {
            status: 502,
            body: String::new(),
        };
        assert!(gateway.recovery_strategy().allows_retry());

        let forbidden = TransportError::Status {
            status: 403,
            body: String::new(),
        };
        assert_eq!(forbidden.recovery_strategy(), RecoveryStrategy::Fatal);
    }

    #[test]
    fn test_build_reqwest_transport() {
        assert!(ReqwestTransport::new(Duration::from_secs(5), Some("test-agent")).is_ok());
    }
}
