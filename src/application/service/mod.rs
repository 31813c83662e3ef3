//! Typed facades over the request pipeline, one per backend area.
//!
//! Facades own the wire paths and record the user-level audit events; the
//! pipeline records per-attempt events on its own.

mod admin;
mod auth;
mod portfolio;
mod settings;
mod signals;
mod stock_picks;

pub use admin::AdminService;
pub use auth::AuthService;
pub use portfolio::PortfolioService;
pub use settings::SettingsService;
pub use signals::SignalService;
pub use stock_picks::StockPickService;

use std::sync::Arc;

use crate::application::client::ApiClient;
use crate::error::ApiError;

/// Every facade over one shared client.
pub struct Services {
    pub client: Arc<ApiClient>,
    pub auth: AuthService,
    pub signals: SignalService,
    pub stock_picks: StockPickService,
    pub portfolio: PortfolioService,
    pub settings: SettingsService,
    pub admin: AdminService,
}

impl Services {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            signals: SignalService::new(client.clone()),
            stock_picks: StockPickService::new(client.clone()),
            portfolio: PortfolioService::new(client.clone()),
            settings: SettingsService::new(client.clone()),
            admin: AdminService::new(client.clone()),
            client,
        }
    }
}

/// Join a resource id onto a collection path.
///
/// Ids are interpolated verbatim, so anything that would change the path
/// structure is refused.
fn resource_path(collection: &str, id: &str) -> Result<String, ApiError> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidRequest(format!(
            "invalid resource id '{id}'"
        )));
    }
    Ok(format!("{collection}/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_path_joins_ids() {
        assert_eq!(
            resource_path("/portfolio/watchlist", "w-1").unwrap(),
            "/portfolio/watchlist/w-1"
        );
    }

    #[test]
    fn resource_path_refuses_structural_ids() {
        for id in ["", "a/b", "a?b=1", "a#b"] {
            assert!(matches!(
                resource_path("/x", id),
                Err(ApiError::InvalidRequest(_))
            ));
        }
    }
}
