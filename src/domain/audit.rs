//! Audit events emitted by the client.
//!
//! Every API attempt produces one event, and user-facing actions (login,
//! settings changes, watchlist edits, ...) produce their own. Events are
//! plain data; delivery is the job of an [`AuditSink`].
//!
//! [`AuditSink`]: crate::port::outbound::audit::AuditSink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::request::Method;
use super::wire::wire_enum;

wire_enum! {
    /// Kind of audited event, using the telemetry event names.
    pub enum AuditEventType {
        Login => "USER_LOGIN",
        Logout => "USER_LOGOUT",
        LoginFailed => "USER_LOGIN_FAILED",
        Signup => "USER_SIGNUP",
        PasswordReset => "PASSWORD_RESET_REQUEST",
        ProfileUpdate => "PROFILE_UPDATED",
        SettingsUpdate => "SETTINGS_UPDATED",
        WatchlistAdd => "WATCHLIST_ITEM_ADDED",
        WatchlistRemove => "WATCHLIST_ITEM_REMOVED",
        AdminSettingsUpdate => "ADMIN_SETTINGS_UPDATED",
        UserRoleChange => "USER_ROLE_CHANGED",
        ApiCall => "API_CALL_MADE",
        ApiError => "API_ERROR_OCCURRED",
        UnauthorizedAccess => "UNAUTHORIZED_ACCESS_ATTEMPT",
    }
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub event_type: AuditEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// What happened on a single API attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord<'a> {
    pub endpoint: &'a str,
    pub method: Method,
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Failure description, when the attempt failed.
    pub error: Option<String>,
    pub elapsed_ms: u64,
    /// 1-based attempt number within the logical call.
    pub attempt: u32,
    /// Identifier shared by every attempt of one logical call.
    pub call_id: &'a str,
    pub user_id: Option<&'a str>,
}

impl AuditEvent {
    /// Create a successful event with no resource or details.
    pub fn new(event_type: AuditEventType, action: impl Into<String>) -> Self {
        Self {
            event_type,
            user_id: None,
            user_name: None,
            action: action.into(),
            resource: None,
            resource_id: None,
            details: Map::new(),
            timestamp: Utc::now(),
            success: true,
            error_message: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.success = false;
        self.error_message = Some(message.into());
        self
    }

    /// Event for one API attempt: `API_CALL_MADE` on success, otherwise
    /// `API_ERROR_OCCURRED` carrying the failure.
    #[must_use]
    pub fn api_attempt(record: &AttemptRecord<'_>) -> Self {
        let (event_type, action) = match record.error {
            None => (
                AuditEventType::ApiCall,
                format!("API {} {}", record.method, record.endpoint),
            ),
            Some(_) => (
                AuditEventType::ApiError,
                format!("API error: {} {}", record.method, record.endpoint),
            ),
        };

        let mut event = Self::new(event_type, action)
            .with_user(record.user_id)
            .with_resource("api")
            .with_detail("endpoint", record.endpoint)
            .with_detail("method", record.method.as_str())
            .with_detail("statusCode", json!(record.status))
            .with_detail("responseTime", record.elapsed_ms)
            .with_detail("attempt", record.attempt)
            .with_detail("callId", record.call_id);

        if let Some(ref message) = record.error {
            event = event.failed(message.clone());
        }
        event
    }

    /// Security event for a request the server rejected with 401.
    #[must_use]
    pub fn unauthorized_access(endpoint: &str, user_id: Option<&str>) -> Self {
        Self::new(
            AuditEventType::UnauthorizedAccess,
            "Unauthorized access attempt detected",
        )
        .with_user(user_id)
        .with_resource(endpoint)
        .failed("Unauthorized")
    }

    #[must_use]
    pub fn login(user_id: &str, user_name: &str) -> Self {
        Self::new(AuditEventType::Login, "User logged in successfully")
            .with_user(Some(user_id))
            .with_user_name(user_name)
    }

    #[must_use]
    pub fn login_failed(user_name: &str, message: &str) -> Self {
        Self::new(AuditEventType::LoginFailed, "User login failed")
            .with_user_name(user_name)
            .failed(message)
    }

    #[must_use]
    pub fn logout(user_id: Option<&str>) -> Self {
        Self::new(AuditEventType::Logout, "User logged out").with_user(user_id)
    }

    #[must_use]
    pub fn signup(user_id: &str, user_name: &str) -> Self {
        Self::new(AuditEventType::Signup, "New user signed up")
            .with_user(Some(user_id))
            .with_user_name(user_name)
    }

    #[must_use]
    pub fn password_reset(email: &str) -> Self {
        Self::new(AuditEventType::PasswordReset, "Password reset requested").with_user_name(email)
    }

    #[must_use]
    pub fn profile_update(user_id: Option<&str>, fields: &[&str]) -> Self {
        Self::new(AuditEventType::ProfileUpdate, "User profile updated")
            .with_user(user_id)
            .with_detail("fieldsUpdated", json!(fields))
    }

    #[must_use]
    pub fn settings_update(user_id: Option<&str>, settings: Value) -> Self {
        Self::new(AuditEventType::SettingsUpdate, "User settings updated")
            .with_user(user_id)
            .with_detail("settings", settings)
    }

    #[must_use]
    pub fn watchlist_add(user_id: Option<&str>, symbol: &str, name: &str) -> Self {
        Self::new(AuditEventType::WatchlistAdd, "Stock added to watchlist")
            .with_user(user_id)
            .with_resource("watchlist")
            .with_detail("stockSymbol", symbol)
            .with_detail("stockName", name)
    }

    #[must_use]
    pub fn watchlist_remove(user_id: Option<&str>, item_id: &str) -> Self {
        Self::new(AuditEventType::WatchlistRemove, "Stock removed from watchlist")
            .with_user(user_id)
            .with_resource("watchlist")
            .with_resource_id(item_id)
    }

    #[must_use]
    pub fn admin_settings_update(admin_id: Option<&str>, changed: Value) -> Self {
        Self::new(AuditEventType::AdminSettingsUpdate, "Admin settings updated")
            .with_user(admin_id)
            .with_resource("admin_settings")
            .with_detail("settingsChanged", changed)
    }

    #[must_use]
    pub fn user_role_change(admin_id: Option<&str>, target_user: &str, roles: &[String]) -> Self {
        Self::new(AuditEventType::UserRoleChange, "User roles changed")
            .with_user(admin_id)
            .with_resource("user")
            .with_resource_id(target_user)
            .with_detail("roles", json!(roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(error: Option<&str>) -> AttemptRecord<'static> {
        AttemptRecord {
            endpoint: "/signals",
            method: Method::Get,
            status: Some(200),
            error: error.map(str::to_string),
            elapsed_ms: 42,
            attempt: 1,
            call_id: "call-1",
            user_id: Some("u-1"),
        }
    }

    #[test]
    fn successful_attempt_is_api_call() {
        let event = AuditEvent::api_attempt(&record(None));
        assert_eq!(event.event_type, AuditEventType::ApiCall);
        assert!(event.success);
        assert_eq!(event.action, "API GET /signals");
        assert_eq!(event.details["statusCode"], 200);
        assert_eq!(event.details["responseTime"], 42);
        assert_eq!(event.user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn failed_attempt_is_api_error() {
        let event = AuditEvent::api_attempt(&record(Some("boom")));
        assert_eq!(event.event_type, AuditEventType::ApiError);
        assert!(!event.success);
        assert_eq!(event.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let event = AuditEvent::unauthorized_access("/settings", None);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "UNAUTHORIZED_ACCESS_ATTEMPT");
        assert_eq!(json["resource"], "/settings");
        assert_eq!(json["success"], false);
        assert!(json.get("userId").is_none());
    }
}
