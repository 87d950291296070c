//! Types for CoinEx REST API requests and responses

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard CoinEx response envelope
///
/// `data` is kept as raw JSON so the bytes handed to callers are exactly the
/// bytes the exchange sent.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    /// Business code (0 on success)
    pub code: i64,
    /// Result data, shape defined per endpoint
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
    /// Failure reason (often "OK" on success)
    #[serde(default)]
    pub message: String,
}

impl ApiResponse {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Raw JSON text of `data`, `null` when absent
    pub fn data_json(&self) -> &str {
        self.data.as_deref().map(RawValue::get).unwrap_or("null")
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Post-only limit order
    MakerOnly,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl OrderType {
    /// Whether the order type needs a price
    pub fn requires_price(&self) -> bool {
        !matches!(self, Self::Market)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::MakerOnly => "maker_only",
            Self::Ioc => "ioc",
            Self::Fok => "fok",
        };
        write!(f, "{}", s)
    }
}

/// Market type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// Spot market
    #[default]
    Spot,
    /// Margin market
    Margin,
    /// Futures market
    Futures,
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spot => write!(f, "spot"),
            Self::Margin => write!(f, "margin"),
            Self::Futures => write!(f, "futures"),
        }
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Sub-account entry from `/account/subs`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubAccount {
    pub sub_user_name: String,
    pub is_frozen: bool,
    pub is_authorized: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Total balance in USD
    pub balance_usd: String,
}

impl SubAccount {
    pub fn balance_usd(&self) -> Option<Decimal> {
        self.balance_usd.parse().ok()
    }
}

// ============================================================================
// Asset Types
// ============================================================================

/// Spot balance for one currency
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotBalance {
    pub ccy: String,
    pub available: String,
    pub frozen: String,
}

impl SpotBalance {
    /// Available amount
    pub fn available(&self) -> Option<Decimal> {
        self.available.parse().ok()
    }

    /// Frozen amount
    pub fn frozen(&self) -> Option<Decimal> {
        self.frozen.parse().ok()
    }

    /// Available plus frozen
    pub fn total(&self) -> Option<Decimal> {
        Some(self.available()? + self.frozen()?)
    }
}

/// Deposit address for a currency and chain
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepositAddress {
    pub address: String,
    /// Memo or tag, empty when the chain does not use one
    #[serde(default)]
    pub memo: String,
}

// ============================================================================
// Market Types
// ============================================================================

/// Spot market definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotMarket {
    pub market: String,
    pub base_ccy: String,
    pub quote_ccy: String,
    pub base_ccy_precision: u32,
    pub quote_ccy_precision: u32,
    pub min_amount: String,
    pub maker_fee_rate: String,
    pub taker_fee_rate: String,
    #[serde(default)]
    pub is_amm_available: bool,
    #[serde(default)]
    pub is_margin_available: bool,
}

impl SpotMarket {
    /// Minimum order amount in base currency
    pub fn min_amount(&self) -> Option<Decimal> {
        self.min_amount.parse().ok()
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Request to place a spot order
///
/// Field order here is the order of keys in the signed JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    /// Market name, e.g. "BTCUSDT"
    pub market: String,
    /// Always spot for this endpoint
    pub market_type: MarketType,
    /// Order side
    pub side: OrderSide,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order amount
    pub amount: Decimal,
    /// Price (not sent for market orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Client-assigned order id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Hide the order from the public book
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hide: Option<bool>,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(
        market: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            market_type: MarketType::Spot,
            side,
            order_type: OrderType::Limit,
            amount,
            price: Some(price),
            client_id: None,
            is_hide: None,
        }
    }

    /// Create a market order
    pub fn market(market: impl Into<String>, side: OrderSide, amount: Decimal) -> Self {
        Self {
            market: market.into(),
            market_type: MarketType::Spot,
            side,
            order_type: OrderType::Market,
            amount,
            price: None,
            client_id: None,
            is_hide: None,
        }
    }

    /// Change the order type (e.g. to maker-only)
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Set a client order id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Hide the order from the public book
    pub fn hidden(mut self) -> Self {
        self.is_hide = Some(true);
        self
    }

    /// Check the request before it is signed
    pub fn validate(&self) -> Result<(), String> {
        if self.market.is_empty() {
            return Err("market must not be empty".to_string());
        }
        if self.amount <= Decimal::ZERO {
            return Err(format!("amount must be positive, got {}", self.amount));
        }
        match (self.order_type.requires_price(), self.price) {
            (true, None) => Err(format!("{} order requires a price", self.order_type)),
            (true, Some(price)) if price <= Decimal::ZERO => {
                Err(format!("price must be positive, got {}", price))
            }
            (false, Some(_)) => Err("market order must not carry a price".to_string()),
            _ => Ok(()),
        }
    }
}

/// Filter for pending and finished order listings
#[derive(Debug, Clone, PartialEq)]
pub struct OrderQuery {
    /// Market name; empty means all markets
    pub market: String,
    pub market_type: MarketType,
    /// Restrict to one side
    pub side: Option<OrderSide>,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl OrderQuery {
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            market_type: MarketType::Spot,
            side: None,
            page: 1,
            limit: 10,
        }
    }

    pub fn with_market_type(mut self, market_type: MarketType) -> Self {
        self.market_type = market_type;
        self
    }

    pub fn with_side(mut self, side: OrderSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Query parameters in wire order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("market", self.market.clone()),
            ("market_type", self.market_type.to_string()),
        ];
        if let Some(side) = self.side {
            params.push(("side", side.to_string()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self::new("")
    }
}

/// Request to cancel a spot order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelOrderRequest {
    pub market: String,
    pub market_type: MarketType,
    pub order_id: i64,
}

impl CancelOrderRequest {
    pub fn new(market: impl Into<String>, order_id: i64) -> Self {
        Self {
            market: market.into(),
            market_type: MarketType::Spot,
            order_id,
        }
    }
}

/// Spot order as returned by the order endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotOrder {
    pub order_id: i64,
    pub market: String,
    pub market_type: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub ccy: String,
    pub amount: String,
    pub price: String,
    #[serde(default)]
    pub client_id: String,
    pub filled_amount: String,
    /// Quote value filled so far
    #[serde(default)]
    pub filled_value: String,
    #[serde(default)]
    pub unfilled_amount: String,
    #[serde(default)]
    pub last_fill_amount: String,
    #[serde(default)]
    pub last_fill_price: String,
    #[serde(default)]
    pub base_fee: String,
    #[serde(default)]
    pub quote_fee: String,
    #[serde(default)]
    pub discount_fee: String,
    pub maker_fee_rate: String,
    pub taker_fee_rate: String,
    /// Lifecycle state, only present on `order-status` and cancel responses
    #[serde(default)]
    pub status: String,
    /// Milliseconds since epoch
    pub created_at: i64,
    /// Milliseconds since epoch
    pub updated_at: i64,
}

impl SpotOrder {
    pub fn amount(&self) -> Option<Decimal> {
        self.amount.parse().ok()
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }

    pub fn filled_amount(&self) -> Option<Decimal> {
        self.filled_amount.parse().ok()
    }

    pub fn filled_value(&self) -> Option<Decimal> {
        self.filled_value.parse().ok()
    }

    /// Whether nothing is left to fill
    pub fn is_fully_filled(&self) -> bool {
        match (self.amount(), self.filled_amount()) {
            (Some(amount), Some(filled)) => filled >= amount,
            _ => false,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.updated_at).single()
    }
}
