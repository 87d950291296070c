//! Credentials and request signing for the CoinEx v2 API
//!
//! Every private CoinEx request carries three headers: the API key, a
//! millisecond timestamp and a signature. The signature is the lowercase hex
//! SHA-256 digest of
//!
//! ```text
//! METHOD + /path?query + body + timestamp + secret
//! ```
//!
//! This crate owns the pieces needed to produce those headers. The clock is a
//! trait so that tests can pin the timestamp and assert exact signatures.
//!
//! # Example
//!
//! ```
//! use coinex_auth::{Credentials, FixedClock, RequestSigner};
//!
//! let creds = Credentials::new("my-access-id", "my-secret").unwrap();
//! let clock = FixedClock::new(1_700_000_000_000);
//!
//! let signer = RequestSigner::new(&creds, &clock);
//! let signature = signer.sign("GET", "/v2/assets/spot/balance", "");
//!
//! assert_eq!(signer.timestamp(), 1_700_000_000_000);
//! assert_eq!(signature.len(), 64);
//! ```

mod clock;
mod credentials;
mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{Credentials, RequestSigner, KEY_HEADER, SIGN_HEADER, TIMESTAMP_HEADER};
pub use error::{AuthError, AuthResult};
