//! Asset endpoints (balances and deposits)

use crate::client::CoinexRestClient;
use crate::error::{RestError, RestResult};
use crate::types::{DepositAddress, SpotBalance};
use tracing::instrument;

/// Asset endpoints
pub struct AssetEndpoints<'a> {
    client: &'a CoinexRestClient,
}

impl<'a> AssetEndpoints<'a> {
    pub fn new(client: &'a CoinexRestClient) -> Self {
        Self { client }
    }

    /// Get spot balances for every currency held
    #[instrument(skip(self))]
    pub async fn get_spot_balance(&self) -> RestResult<Vec<SpotBalance>> {
        self.client.get("/assets/spot/balance", &[]).await
    }

    /// Get the deposit address for a currency on a chain
    ///
    /// # Arguments
    /// * `ccy` - Currency, e.g. "USDT"
    /// * `chain` - Chain name, e.g. "TRC20"
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&self, ccy: &str, chain: &str) -> RestResult<DepositAddress> {
        if ccy.is_empty() || chain.is_empty() {
            return Err(RestError::InvalidParameter(
                "ccy and chain are required".to_string(),
            ));
        }

        let params = [("ccy", ccy.to_string()), ("chain", chain.to_string())];

        self.client.get("/assets/deposit-address", &params).await
    }
}
