//! Error types for REST API operations

use crate::error_codes::{ApiErrorCode, RecoveryStrategy};
use crate::transport::TransportError;
use coinex_auth::AuthError;
use reqwest::Method;

/// Errors that can occur during REST API operations
///
/// The first group (`UnsupportedMethod`, `InvalidUrl`, `Serialize`,
/// `InvalidParameter`) is detected locally and never reaches the network.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Only GET and POST are signed by this client
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(Method),

    /// Base URL or request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request body or query string could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Network failure or non-200 HTTP status
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response body is not a valid envelope
    #[error("Failed to decode response envelope: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// Envelope carried a non-zero business code
    #[error("API error {code}: {message}")]
    Api {
        /// Business code from the envelope
        code: i64,
        /// Message from the envelope, verbatim
        message: String,
        /// HTTP status of the response that carried the envelope
        http_status: u16,
    },

    /// Envelope data does not match the expected shape
    #[error("Failed to deserialize response data: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// Credentials could not be loaded
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl RestError {
    /// True for errors raised before any network I/O
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod(_)
                | Self::InvalidUrl(_)
                | Self::Serialize(_)
                | Self::InvalidParameter(_)
        )
    }

    /// True for network failures and non-200 responses
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Business code, if the exchange rejected the request
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the recovery strategy for this error
    ///
    /// Advisory only: the client itself never retries.
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api { code, .. } => ApiErrorCode::from_code(*code)
                .map(|c| c.recovery_strategy())
                .unwrap_or(RecoveryStrategy::Manual),
            Self::Transport(err) => err.recovery_strategy(),
            Self::Auth(_) => RecoveryStrategy::Fatal,
            Self::UnsupportedMethod(_)
            | Self::InvalidUrl(_)
            | Self::Serialize(_)
            | Self::InvalidParameter(_)
            | Self::Decode { .. }
            | Self::Deserialize(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Api { code, .. } => {
                matches!(ApiErrorCode::from_code(*code), Some(ApiErrorCode::RateLimited))
            }
            Self::Transport(TransportError::Status { status, .. }) => *status == 429,
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
