use std::sync::Arc;

use crate::application::client::ApiClient;
use crate::domain::signal::{SignalFilter, SignalStatistics, SignalsResponse};
use crate::error::Result;

/// Trading signals.
pub struct SignalService {
    client: Arc<ApiClient>,
}

impl SignalService {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /signals` with the given filters.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn list(&self, filter: &SignalFilter) -> Result<SignalsResponse> {
        Ok(self.client.get(&filter.to_path()).await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn statistics(&self) -> Result<SignalStatistics> {
        Ok(self.client.get("/signals/statistics").await?)
    }
}
