//! Main REST client and the signed request pipeline

use crate::endpoints::{AccountEndpoints, AssetEndpoints, SpotEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{
    HttpRequest, HttpTransport, ReqwestTransport, TransportError, DEFAULT_TIMEOUT_SECS,
};
use crate::types::{
    ApiResponse, DepositAddress, OrderQuery, OrderRequest, OrderSide, SpotBalance, SpotMarket,
    SpotOrder, SubAccount,
};
use coinex_auth::{
    Clock, Credentials, RequestSigner, SystemClock, KEY_HEADER, SIGN_HEADER, TIMESTAMP_HEADER,
};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Production endpoint, including the API version prefix
pub const DEFAULT_BASE_URL: &str = "https://api.coinex.com/v2";

const BASE_URL_ENV: &str = "COINEX_BASE_URL";

/// CoinEx REST API client
///
/// Every call is signed with the client's credentials. The transport and
/// the clock are injectable so tests can pin both the wire and the
/// timestamp.
///
/// # Example
///
/// ```no_run
/// use coinex_rest::{CoinexRestClient, Credentials, OrderQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let creds = Credentials::from_env()?;
///     let client = CoinexRestClient::new("https://api.coinex.com/v2", creds)?;
///
///     let balances = client.get_spot_balance().await?;
///     let pending = client.list_pending_orders(&OrderQuery::new("BTCUSDT")).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinexRestClient {
    base_url: Url,
    credentials: Credentials,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
}

impl CoinexRestClient {
    /// Create a client for the given base URL
    ///
    /// The base URL's path (e.g. `/v2`) is prefixed to every request path.
    pub fn new(base_url: &str, credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_base_url(base_url), credentials)
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig, credentials: Credentials) -> RestResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let transport = ReqwestTransport::new(
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref(),
        )?;

        info!(base_url = %base_url, "Created CoinEx REST client");

        Ok(Self {
            base_url,
            credentials,
            transport: Arc::new(transport),
            clock: Arc::new(SystemClock),
        })
    }

    /// Create a client from `COINEX_API_KEY`, `COINEX_API_SECRET` and
    /// optionally `COINEX_BASE_URL`
    pub fn from_env() -> RestResult<Self> {
        let credentials = Credentials::from_env()?;
        Self::with_config(ClientConfig::from_env(), credentials)
    }

    /// Replace the HTTP transport
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access id used for signing
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    // ========================================================================
    // Signed request pipeline
    // ========================================================================

    /// Sign and send one request, returning the envelope's raw `data` bytes
    ///
    /// `query` is only used for GET and `body` only for POST, where it must
    /// encode to a JSON object. Any other method fails with
    /// [`RestError::UnsupportedMethod`] before any I/O.
    ///
    /// # Errors
    /// * pre-flight: `UnsupportedMethod`, `InvalidUrl`, `Serialize`
    /// * `Transport` for network failures and any status other than 200
    /// * `Decode` when the body is not an envelope
    /// * `Api` when the envelope code is not 0, with the message verbatim
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&B>,
    ) -> RestResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let is_get = if method == Method::GET {
            true
        } else if method == Method::POST {
            false
        } else {
            return Err(RestError::UnsupportedMethod(method));
        };

        let query_string = match query {
            Some(params) if is_get && !params.is_empty() => serde_urlencoded::to_string(params)
                .map_err(|e| RestError::Serialize(e.to_string()))?,
            Some(params) if !is_get && !params.is_empty() => {
                warn!(path, "Ignoring query parameters on POST request");
                String::new()
            }
            _ => String::new(),
        };

        // The signature covers these exact bytes.
        let body = match body {
            Some(body) if !is_get => {
                let json =
                    serde_json::to_string(body).map_err(|e| RestError::Serialize(e.to_string()))?;
                // Checked on the encoded text so struct field order is kept.
                if !json.starts_with('{') {
                    return Err(RestError::Serialize(format!(
                        "request body must be a JSON object, got {}",
                        json
                    )));
                }
                json
            }
            Some(_) => {
                warn!(path, "Ignoring body on GET request");
                String::new()
            }
            None => String::new(),
        };

        let url = self.build_url(path, &query_string)?;
        let path_and_query = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };

        let signer = RequestSigner::new(&self.credentials, self.clock.as_ref());
        let signature = signer.sign(method.as_str(), &path_and_query, &body);

        let request = HttpRequest {
            method: method.clone(),
            url,
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                (KEY_HEADER, signer.api_key().to_string()),
                (SIGN_HEADER, signature),
                (TIMESTAMP_HEADER, signer.timestamp().to_string()),
            ],
            body: body.into_bytes(),
        };

        debug!(method = %method, path = %path_and_query, "Making signed request");

        let response = self.transport.send(request).await?;

        if response.status != 200 {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            warn!(
                status = response.status,
                body = %body,
                "Request coinex api with wrong status"
            );
            return Err(TransportError::Status {
                status: response.status,
                body,
            }
            .into());
        }

        let envelope: ApiResponse =
            serde_json::from_slice(&response.body).map_err(|source| RestError::Decode {
                source,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            })?;

        if !envelope.is_success() {
            warn!(
                code = envelope.code,
                message = %envelope.message,
                "Request coinex api with wrong code"
            );
            return Err(RestError::Api {
                code: envelope.code,
                message: envelope.message,
                http_status: response.status,
            });
        }

        Ok(envelope.data_json().as_bytes().to_vec())
    }

    /// Signed GET, decoding `data` into `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let data = self
            .execute(Method::GET, path, Some(params), None::<&()>)
            .await?;
        decode_data(&data)
    }

    /// Signed POST with a JSON body, decoding `data` into `T`
    pub async fn post<T, B>(&self, path: &str, body: &B) -> RestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let data = self.execute(Method::POST, path, None, Some(body)).await?;
        decode_data(&data)
    }

    fn build_url(&self, path: &str, query: &str) -> RestResult<Url> {
        let prefix = self.base_url.path().trim_end_matches('/');
        let full_path = if path.starts_with('/') {
            format!("{}{}", prefix, path)
        } else {
            format!("{}/{}", prefix, path)
        };

        let mut url = self.base_url.clone();
        url.set_path(&full_path);
        url.set_query(if query.is_empty() { None } else { Some(query) });
        url.set_fragment(None);
        Ok(url)
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Sub-account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Asset endpoints
    pub fn assets(&self) -> AssetEndpoints<'_> {
        AssetEndpoints::new(self)
    }

    /// Spot trading and market endpoints
    pub fn spot(&self) -> SpotEndpoints<'_> {
        SpotEndpoints::new(self)
    }

    /// List sub-accounts
    pub async fn get_sub_accounts(
        &self,
        sub_user_name: &str,
        is_frozen: bool,
    ) -> RestResult<Vec<SubAccount>> {
        self.account().get_sub_accounts(sub_user_name, is_frozen).await
    }

    /// Get spot balances
    pub async fn get_spot_balance(&self) -> RestResult<Vec<SpotBalance>> {
        self.assets().get_spot_balance().await
    }

    /// Get a deposit address
    pub async fn get_deposit_address(&self, ccy: &str, chain: &str) -> RestResult<DepositAddress> {
        self.assets().get_deposit_address(ccy, chain).await
    }

    /// Get spot market definitions
    pub async fn get_spot_markets(&self, market: Option<&str>) -> RestResult<Vec<SpotMarket>> {
        self.spot().get_markets(market).await
    }

    /// Place a limit order
    pub async fn place_limit_order(
        &self,
        market: &str,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> RestResult<SpotOrder> {
        self.spot()
            .place_order(&OrderRequest::limit(market, side, amount, price))
            .await
    }

    /// Place a market order
    pub async fn place_market_order(
        &self,
        market: &str,
        side: OrderSide,
        amount: Decimal,
    ) -> RestResult<SpotOrder> {
        self.spot()
            .place_order(&OrderRequest::market(market, side, amount))
            .await
    }

    /// Place an order
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<SpotOrder> {
        self.spot().place_order(order).await
    }

    /// Cancel an open order
    pub async fn cancel_order(&self, market: &str, order_id: i64) -> RestResult<SpotOrder> {
        self.spot().cancel_order(market, order_id).await
    }

    /// Get the current state of a single order
    pub async fn get_order_status(&self, market: &str, order_id: i64) -> RestResult<SpotOrder> {
        self.spot().get_order_status(market, order_id).await
    }

    /// List unfilled orders
    pub async fn list_pending_orders(&self, query: &OrderQuery) -> RestResult<Vec<SpotOrder>> {
        self.spot().list_pending_orders(query).await
    }

    /// List filled or cancelled orders
    pub async fn list_finished_orders(&self, query: &OrderQuery) -> RestResult<Vec<SpotOrder>> {
        self.spot().list_finished_orders(query).await
    }
}

impl std::fmt::Debug for CoinexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinexRestClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> RestResult<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
    }
    Ok(url)
}

fn decode_data<T: DeserializeOwned>(data: &[u8]) -> RestResult<T> {
    serde_json::from_slice(data).map_err(RestError::Deserialize)
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the version path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the base URL taken from `COINEX_BASE_URL` when set
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new().with_base_url(url),
            _ => Self::new(),
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("test_access_id", "secret").unwrap()
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://example.test/v2")
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "https://example.test/v2");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            CoinexRestClient::new("not a url", creds()),
            Err(RestError::InvalidUrl(_))
        ));
        assert!(matches!(
            CoinexRestClient::new("mailto:ops@coinex.com", creds()),
            Err(RestError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_build_url_keeps_version_prefix() {
        let client = CoinexRestClient::new("https://api.coinex.com/v2", creds()).unwrap();
        let url = client.build_url("/spot/order", "").unwrap();
        assert_eq!(url.as_str(), "https://api.coinex.com/v2/spot/order");
        assert_eq!(url.query(), None);

        let url = client.build_url("spot/pending-order", "page=1&limit=10").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coinex.com/v2/spot/pending-order?page=1&limit=10"
        );
    }

    #[test]
    fn test_build_url_trailing_slash_and_no_prefix() {
        let client = CoinexRestClient::new("https://api.coinex.com/v2/", creds()).unwrap();
        assert_eq!(client.build_url("/account/subs", "").unwrap().path(), "/v2/account/subs");

        let client = CoinexRestClient::new("https://api.coinex.com", creds()).unwrap();
        assert_eq!(client.build_url("/v2/spot/market", "").unwrap().path(), "/v2/spot/market");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = CoinexRestClient::new(DEFAULT_BASE_URL, creds()).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("api.coinex.com"));
        assert!(!debug.contains("secret\""));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<CoinexRestClient>();
    }
}
