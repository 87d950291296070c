//! Authentication credentials for the CoinEx API
//!
//! CoinEx v2 signs requests with a plain SHA-256 digest where the secret is
//! the last component of the hashed string:
//!
//! ```text
//! sha256(method + path_and_query + body + timestamp + secret)
//! ```
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::clock::Clock;
use crate::error::{AuthError, AuthResult};

/// Header carrying the access id
pub const KEY_HEADER: &str = "X-COINEX-KEY";
/// Header carrying the hex signature
pub const SIGN_HEADER: &str = "X-COINEX-SIGN";
/// Header carrying the signed millisecond timestamp
pub const TIMESTAMP_HEADER: &str = "X-COINEX-TIMESTAMP";

const API_KEY_ENV: &str = "COINEX_API_KEY";
const API_SECRET_ENV: &str = "COINEX_API_SECRET";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// Access id (public)
    api_key: String,
    /// Secret key
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an access id and secret key
    ///
    /// Both values must be non-empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("empty API key".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("empty API secret".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINEX_API_KEY` and `COINEX_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request
    ///
    /// # Arguments
    /// * `method` - Upper-case HTTP method (`GET` or `POST`)
    /// * `path_and_query` - Full request path including the version prefix
    ///   and `?query`, without scheme and host
    /// * `body` - Exact body text that will be transmitted (empty for GET)
    /// * `timestamp_ms` - Timestamp sent in `X-COINEX-TIMESTAMP`
    ///
    /// # Returns
    /// 64 character lowercase hex digest
    pub fn sign(
        &self,
        method: &str,
        path_and_query: &str,
        body: &str,
        timestamp_ms: u64,
    ) -> String {
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(path_and_query.as_bytes());
        hasher.update(body.as_bytes());
        hasher.update(timestamp_ms.to_string().as_bytes());
        hasher.update(self.api_secret.expose_secret().as_bytes());

        hex::encode(hasher.finalize())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretString with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer bound to a single timestamp
///
/// The timestamp is read from the clock once, at construction, so the value
/// that is hashed and the value sent in the header cannot drift apart.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials, clock: &dyn Clock) -> Self {
        Self {
            credentials,
            timestamp: clock.now_millis(),
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request
    pub fn sign(&self, method: &str, path_and_query: &str, body: &str) -> String {
        trace!(method, path = path_and_query, timestamp = self.timestamp, "signing request");
        self.credentials.sign(method, path_and_query, body, self.timestamp)
    }
}
