use std::sync::Arc;

use tracing::info;

use super::resource_path;
use crate::application::client::ApiClient;
use crate::domain::portfolio::{
    AddToWatchlistRequest, PortfolioPerformance, TradeFilter, TradesResponse, WatchlistAdded,
    WatchlistResponse,
};
use crate::domain::{Acknowledgement, AuditEvent};
use crate::error::Result;

const WATCHLIST: &str = "/portfolio/watchlist";

/// Trade history, performance and the watchlist.
pub struct PortfolioService {
    client: Arc<ApiClient>,
}

impl PortfolioService {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /portfolio/trades` with the given filters.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn trades(&self, filter: &TradeFilter) -> Result<TradesResponse> {
        Ok(self.client.get(&filter.to_path()).await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn performance(&self) -> Result<PortfolioPerformance> {
        Ok(self.client.get("/portfolio/performance").await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn watchlist(&self) -> Result<WatchlistResponse> {
        Ok(self.client.get(WATCHLIST).await?)
    }

    /// Add a stock to the watchlist and audit the change.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn add_to_watchlist(&self, item: &AddToWatchlistRequest) -> Result<WatchlistAdded> {
        let added: WatchlistAdded = self.client.post(WATCHLIST, item).await?;
        info!(symbol = %item.symbol, "Added to watchlist");
        self.client.record_audit(AuditEvent::watchlist_add(
            self.client.user_id().as_deref(),
            &item.symbol,
            &item.name,
        ));
        Ok(added)
    }

    /// Remove a watchlist entry by id and audit the change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`](crate::error::ApiError::InvalidRequest)
    /// for an unusable id, otherwise the pipeline error.
    pub async fn remove_from_watchlist(&self, id: &str) -> Result<Acknowledgement> {
        let path = resource_path(WATCHLIST, id)?;
        let ack: Acknowledgement = self.client.delete(&path).await?;
        info!(id = %id, "Removed from watchlist");
        self.client.record_audit(AuditEvent::watchlist_remove(
            self.client.user_id().as_deref(),
            id,
        ));
        Ok(ack)
    }
}
