use std::sync::Arc;

use serde_json::json;

use crate::application::client::ApiClient;
use crate::domain::settings::{SettingsUpdated, UpdateSettingsRequest, UserSettings};
use crate::domain::AuditEvent;
use crate::error::Result;

const SETTINGS: &str = "/settings";

/// The signed-in user's preferences.
pub struct SettingsService {
    client: Arc<ApiClient>,
}

impl SettingsService {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn get(&self) -> Result<UserSettings> {
        Ok(self.client.get(SETTINGS).await?)
    }

    /// `PUT /settings` with only the fields that are set.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn update(&self, update: &UpdateSettingsRequest) -> Result<SettingsUpdated> {
        let updated: SettingsUpdated = self.client.put(SETTINGS, update).await?;
        self.client.record_audit(AuditEvent::settings_update(
            self.client.user_id().as_deref(),
            json!(update.changed_fields()),
        ));
        Ok(updated)
    }
}
