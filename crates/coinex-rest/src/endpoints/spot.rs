//! Spot trading and market endpoints

use crate::client::CoinexRestClient;
use crate::error::{RestError, RestResult};
use crate::types::{CancelOrderRequest, OrderQuery, OrderRequest, SpotMarket, SpotOrder};
use tracing::{debug, instrument};

/// Spot endpoints
pub struct SpotEndpoints<'a> {
    client: &'a CoinexRestClient,
}

impl<'a> SpotEndpoints<'a> {
    pub fn new(client: &'a CoinexRestClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// The request is validated locally first; an invalid request is never
    /// signed or sent.
    #[instrument(
        skip(self, order),
        fields(market = %order.market, side = %order.side, order_type = %order.order_type)
    )]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<SpotOrder> {
        order.validate().map_err(RestError::InvalidParameter)?;

        debug!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.amount, order.market
        );

        self.client.post("/spot/order", order).await
    }

    /// Cancel an open order
    ///
    /// # Arguments
    /// * `market` - Market the order was placed on
    /// * `order_id` - Exchange-assigned order id
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, market: &str, order_id: i64) -> RestResult<SpotOrder> {
        if market.is_empty() {
            return Err(RestError::InvalidParameter("market is required".to_string()));
        }

        debug!("Cancelling order {} on {}", order_id, market);

        self.client
            .post("/spot/cancel-order", &CancelOrderRequest::new(market, order_id))
            .await
    }

    /// Get the current state of a single order
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, market: &str, order_id: i64) -> RestResult<SpotOrder> {
        if market.is_empty() {
            return Err(RestError::InvalidParameter("market is required".to_string()));
        }

        let params = [
            ("market", market.to_string()),
            ("order_id", order_id.to_string()),
        ];

        self.client.get("/spot/order-status", &params).await
    }

    /// List unfilled orders
    #[instrument(skip(self))]
    pub async fn list_pending_orders(&self, query: &OrderQuery) -> RestResult<Vec<SpotOrder>> {
        self.client
            .get("/spot/pending-order", &query.to_params())
            .await
    }

    /// List filled or cancelled orders
    #[instrument(skip(self))]
    pub async fn list_finished_orders(&self, query: &OrderQuery) -> RestResult<Vec<SpotOrder>> {
        self.client
            .get("/spot/finished-order", &query.to_params())
            .await
    }

    /// Get market definitions
    ///
    /// # Arguments
    /// * `market` - Comma-separated market names; all markets when `None`
    #[instrument(skip(self))]
    pub async fn get_markets(&self, market: Option<&str>) -> RestResult<Vec<SpotMarket>> {
        let params: Vec<(&str, String)> = match market {
            Some(market) => vec![("market", market.to_string())],
            None => Vec::new(),
        };

        self.client.get("/spot/market", &params).await
    }
}
