//! Sub-account endpoints

use crate::client::CoinexRestClient;
use crate::error::RestResult;
use crate::types::SubAccount;
use tracing::instrument;

/// Sub-account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a CoinexRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a CoinexRestClient) -> Self {
        Self { client }
    }

    /// List sub-accounts
    ///
    /// # Arguments
    /// * `sub_user_name` - Filter by sub-account name (empty for all)
    /// * `is_frozen` - Filter by frozen state
    #[instrument(skip(self))]
    pub async fn get_sub_accounts(
        &self,
        sub_user_name: &str,
        is_frozen: bool,
    ) -> RestResult<Vec<SubAccount>> {
        let params = [
            ("sub_user_name", sub_user_name.to_string()),
            ("is_frozen", is_frozen.to_string()),
        ];

        self.client.get("/account/subs", &params).await
    }
}
