use std::sync::Arc;

use crate::application::client::ApiClient;
use crate::domain::stock_pick::{StockPickFilter, StockPicksResponse};
use crate::error::Result;

/// Analyst stock picks.
pub struct StockPickService {
    client: Arc<ApiClient>,
}

impl StockPickService {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /stock-picks` with the given filters.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn list(&self, filter: &StockPickFilter) -> Result<StockPicksResponse> {
        Ok(self.client.get(&filter.to_path()).await?)
    }
}
