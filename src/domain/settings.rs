//! Per-user notification and market preferences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: String,
    pub user_id: String,
    pub push_notifications: bool,
    pub email_notifications: bool,
    pub sms_alerts: bool,
    pub weekend_notifications: bool,
    pub india_market_enabled: bool,
    pub us_market_enabled: bool,
    pub updated_at: String,
}

/// Partial update for `PUT /settings`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub india_market_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us_market_enabled: Option<bool>,
}

impl UpdateSettingsRequest {
    /// True when no field would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Wire names of the fields that are set, for audit details.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("pushNotifications", self.push_notifications),
            ("emailNotifications", self.email_notifications),
            ("smsAlerts", self.sms_alerts),
            ("weekendNotifications", self.weekend_notifications),
            ("indiaMarketEnabled", self.india_market_enabled),
            ("usMarketEnabled", self.us_market_enabled),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|_| name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdated {
    pub success: bool,
    pub settings: UserSettings,
}
