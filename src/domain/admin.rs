//! Admin console: application settings, security, users and audit logs.

use serde::{Deserialize, Serialize};

use super::query::Query;
use super::response::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub id: String,
    pub app_name: String,
    pub app_description: String,
    pub maintenance_mode: bool,
    pub api_rate_limiting_enabled: bool,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_email: String,
    pub email_notifications_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub azure_endpoint: String,
    pub api_version: String,
    pub rate_limit_requests: u32,
    pub rate_limit_window_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    pub email_enabled: bool,
    pub slack_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettingsResponse {
    pub app_settings: AppSettings,
    pub email_config: EmailConfig,
    pub api_config: ApiConfig,
    pub notification_config: NotificationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppSettingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_rate_limiting_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettingsUpdated {
    pub success: bool,
    pub settings: AppSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailConfigRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub two_factor_required: bool,
    pub email_verification_required: bool,
    pub strong_password_required: bool,
    pub session_timeout_minutes: u32,
    pub remember_me_enabled: bool,
    pub rbac_enabled: bool,
    pub ip_whitelist_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecuritySettingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verification_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strong_password_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_me_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbac_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_whitelist_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettingsUpdated {
    pub success: bool,
    pub settings: SecuritySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpWhitelistEntry {
    pub id: String,
    pub ip_address: String,
    pub description: String,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpWhitelistResponse {
    pub data: Vec<IpWhitelistEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIpWhitelistRequest {
    pub ip_address: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpWhitelistAdded {
    pub success: bool,
    pub entry: IpWhitelistEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub roles: Vec<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUsersResponse {
    pub data: Vec<AdminUser>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRolesRequest {
    pub roles: Vec<String>,
}

/// Filters for `GET /admin/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl UserFilter {
    #[must_use]
    pub fn to_path(&self) -> String {
        Query::new()
            .text("role", self.role.as_deref())
            .text("search", self.search.as_deref())
            .number("page", self.page)
            .number("pageSize", self.page_size)
            .into_path("/admin/users")
    }
}

/// Before/after snapshot of an audited change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditChanges {
    #[serde(default)]
    pub before: serde_json::Value,
    #[serde(default)]
    pub after: serde_json::Value,
}

/// Server-side audit log entry (admin actions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub admin_user_id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub changes: AuditChanges,
    pub ip_address: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogsResponse {
    pub data: Vec<AuditLogEntry>,
    pub pagination: Pagination,
}

/// Filters for `GET /admin/audit-logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    pub user_id: Option<String>,
    pub action: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AuditLogFilter {
    #[must_use]
    pub fn to_path(&self) -> String {
        Query::new()
            .text("userId", self.user_id.as_deref())
            .text("action", self.action.as_deref())
            .text("startDate", self.start_date.as_deref())
            .text("endDate", self.end_date.as_deref())
            .number("page", self.page)
            .number("pageSize", self.page_size)
            .into_path("/admin/audit-logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_filter_path() {
        let filter = UserFilter {
            role: Some("Admin".into()),
            search: Some("smith".into()),
            page: Some(3),
            page_size: Some(20),
        };
        assert_eq!(
            filter.to_path(),
            "/admin/users?role=Admin&search=smith&page=3&pageSize=20"
        );
    }

    #[test]
    fn audit_log_filter_path() {
        let filter = AuditLogFilter {
            user_id: Some("u-9".into()),
            action: Some("UPDATE_SETTINGS".into()),
            ..Default::default()
        };
        assert_eq!(
            filter.to_path(),
            "/admin/audit-logs?userId=u-9&action=UPDATE_SETTINGS"
        );
    }

    #[test]
    fn email_update_omits_unset_secrets() {
        let update = UpdateEmailConfigRequest {
            smtp_host: Some("smtp.example.com".into()),
            smtp_port: Some(587),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["smtpHost"], "smtp.example.com");
        assert_eq!(json["smtpPort"], 587);
        assert!(json.get("smtpPassword").is_none());
    }
}
