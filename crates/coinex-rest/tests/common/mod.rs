//! Common test utilities and fixtures for integration tests
//!
//! Contains a recording transport and sample CoinEx v2 responses.

#![allow(dead_code)]

use async_trait::async_trait;
use coinex_rest::{
    CoinexRestClient, Credentials, FixedClock, HttpRequest, HttpResponse, HttpTransport,
    TransportError,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Fixed timestamp used for every signed test request
pub const TS: u64 = 1_700_000_000_000;

pub const API_KEY: &str = "test_access_id";
pub const API_SECRET: &str = "secret";
pub const BASE_URL: &str = "https://api.coinex.com/v2";

/// What the spy answers with
#[derive(Debug, Clone)]
pub enum Reply {
    Http { status: u16, body: String },
    Timeout,
    ConnectFailed,
}

/// Transport that records every request and answers with a canned reply
pub struct SpyTransport {
    reply: Reply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl SpyTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// 200 with the given body
    pub fn ok(body: impl Into<String>) -> Arc<Self> {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Arc<Self> {
        Self::new(Reply::Http {
            status,
            body: body.into(),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for SpyTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);

        match &self.reply {
            Reply::Http { status, body } => Ok(HttpResponse {
                status: *status,
                body: body.clone().into_bytes(),
            }),
            Reply::Timeout => Err(TransportError::Timeout),
            Reply::ConnectFailed => Err(TransportError::Connect("connection refused".to_string())),
        }
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).expect("valid test credentials")
}

/// Client wired to the spy with a frozen clock
pub fn client_with(spy: &Arc<SpyTransport>) -> CoinexRestClient {
    CoinexRestClient::new(BASE_URL, credentials())
        .expect("valid base url")
        .with_transport(spy.clone())
        .with_clock(Arc::new(FixedClock::new(TS)))
}

/// Wrap a data payload in a success envelope
pub fn envelope(data: &str) -> String {
    format!(r#"{{"code":0,"data":{},"message":"OK"}}"#, data)
}

pub const SUB_ACCOUNTS_DATA: &str = r#"[
    {
        "sub_user_name": "alice",
        "is_frozen": false,
        "is_authorized": true,
        "permissions": ["TRADE", "VIEW"],
        "balance_usd": "1250.75"
    }
]"#;

pub const SPOT_BALANCE_DATA: &str = r#"[
    {"ccy": "USDT", "available": "1000.5", "frozen": "20"},
    {"ccy": "BTC", "available": "0.25", "frozen": "0"}
]"#;

pub const SPOT_ORDER_DATA: &str = r#"{
    "amount": "1",
    "base_fee": "0",
    "ccy": "BTC",
    "client_id": "",
    "created_at": 1700000000123,
    "discount_fee": "0",
    "filled_amount": "0",
    "filled_value": "0",
    "last_fill_amount": "0",
    "last_fill_price": "0",
    "maker_fee_rate": "0.002",
    "market": "BTCUSDT",
    "market_type": "SPOT",
    "order_id": 13400,
    "price": "100",
    "quote_fee": "0",
    "side": "buy",
    "taker_fee_rate": "0.002",
    "type": "limit",
    "unfilled_amount": "1",
    "updated_at": 1700000000123
}"#;

/// `SPOT_ORDER_DATA` with a lifecycle status, as returned by order-status and cancel
pub fn spot_order_with_status(status: &str) -> String {
    SPOT_ORDER_DATA.replacen('{', &format!("{{\n    \"status\": \"{}\",", status), 1)
}

pub fn spot_order_list_data() -> String {
    format!("[{}]", SPOT_ORDER_DATA)
}

pub const SPOT_MARKET_DATA: &str = r#"[
    {
        "market": "BTCUSDT",
        "base_ccy": "BTC",
        "quote_ccy": "USDT",
        "base_ccy_precision": 8,
        "quote_ccy_precision": 2,
        "min_amount": "0.0001",
        "maker_fee_rate": "0.002",
        "taker_fee_rate": "0.002",
        "is_amm_available": true,
        "is_margin_available": true
    }
]"#;

pub const DEPOSIT_ADDRESS_DATA: &str = r#"{"address": "TXYZ1234567890", "memo": ""}"#;

pub const INVALID_SIGNATURE: &str = r#"{"code":24,"data":null,"message":"invalid signature"}"#;
