//! REST API client for the CoinEx cryptocurrency exchange
//!
//! This crate provides a signed REST client for CoinEx API v2, covering
//! sub-accounts, balances, and spot order placement and queries.
//!
//! # Features
//!
//! - **Account**: Sub-account listing
//! - **Assets**: Spot balances, deposit addresses
//! - **Spot**: Limit and market orders, pending and finished order queries,
//!   market definitions
//!
//! # Authentication
//!
//! Every request is signed with SHA-256 over method, path, body, timestamp
//! and secret, and carries the `X-COINEX-KEY`, `X-COINEX-SIGN` and
//! `X-COINEX-TIMESTAMP` headers. See [`coinex_auth`] for the details.
//!
//! # Responses
//!
//! CoinEx wraps every payload in `{ "code", "data", "message" }`. A call
//! succeeds only when the HTTP status is 200 and `code` is 0; everything else
//! becomes a [`RestError`].
//!
//! # Example
//!
//! ```no_run
//! use coinex_rest::{CoinexRestClient, Credentials, OrderSide};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let client = CoinexRestClient::new("https://api.coinex.com/v2", creds)?;
//!
//!     let accounts = client.get_sub_accounts("", false).await?;
//!     println!("Sub-accounts: {:?}", accounts);
//!
//!     let order = client
//!         .place_limit_order("BTCUSDT", OrderSide::Buy, Decimal::new(1, 2), Decimal::from(30000))
//!         .await?;
//!     println!("Placed order {}", order.order_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! The client never retries. [`RestError::is_retryable`] and
//! [`RestError::recovery_strategy`] classify failures so callers can decide.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod error_codes;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinexRestClient, DEFAULT_BASE_URL};
pub use coinex_auth::{Clock, Credentials, FixedClock, SystemClock};
pub use error::{RestError, RestResult};
pub use error_codes::{ApiErrorCode, RecoveryStrategy};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

// Re-export endpoint-specific types
pub use types::{
    // Envelope
    ApiResponse,
    // Account and assets
    DepositAddress, SpotBalance, SubAccount,
    // Trading
    CancelOrderRequest, MarketType, OrderQuery, OrderRequest, OrderSide, OrderType, SpotMarket,
    SpotOrder,
};

// Re-exported so callers can name the method passed to `execute`
pub use reqwest::Method;
