//! End-to-end tests of `ReqwestTransport` against a local mock server

mod common;

use common::*;
use coinex_rest::{CoinexRestClient, FixedClock, OrderSide, RestError, TransportError};
use httpmock::prelude::*;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn client_for(server: &MockServer) -> CoinexRestClient {
    CoinexRestClient::new(&server.url("/v2"), credentials())
        .unwrap()
        .with_clock(Arc::new(FixedClock::new(TS)))
}

#[tokio::test]
async fn test_signed_get_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/assets/spot/balance")
                .header("X-COINEX-KEY", API_KEY)
                .header("X-COINEX-TIMESTAMP", "1700000000000")
                .header(
                    "X-COINEX-SIGN",
                    "46b711c80a5d0eb32cc0c6e0a21ab851ae654af922762d601a6470ea7b60649d",
                );
            then.status(200)
                .header("content-type", "application/json")
                .body(envelope(SPOT_BALANCE_DATA));
        })
        .await;

    let balances = client_for(&server).get_spot_balance().await.unwrap();

    mock.assert_async().await;
    assert_eq!(balances.len(), 2);
}

#[tokio::test]
async fn test_signed_post_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/spot/order")
                .header("content-type", "application/json")
                .header(
                    "X-COINEX-SIGN",
                    "b53769c9986e1d62e89ec6f795f1c69fc78225a5fc5f736500de595e815a13d8",
                )
                .body(r#"{"market":"BTCUSDT","market_type":"spot","side":"buy","type":"limit","amount":"1","price":"100"}"#);
            then.status(200).body(envelope(SPOT_ORDER_DATA));
        })
        .await;

    let order = client_for(&server)
        .place_limit_order("BTCUSDT", OrderSide::Buy, dec!(1), dec!(100))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(order.order_id, 13400);
}

#[tokio::test]
async fn test_http_error_status_surfaces_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/spot/market");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let err = client_for(&server).get_spot_markets(None).await.unwrap_err();

    match err {
        RestError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_business_error_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/account/subs");
            then.status(200).body(INVALID_SIGNATURE);
        })
        .await;

    let err = client_for(&server)
        .get_sub_accounts("", false)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RestError::Api { code: 24, ref message, http_status: 200 } if message == "invalid signature"
    ));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = CoinexRestClient::new("http://127.0.0.1:9/v2", credentials())
        .unwrap()
        .with_clock(Arc::new(FixedClock::new(TS)));

    let err = client.get_spot_balance().await.unwrap_err();

    assert!(err.is_transport());
}
