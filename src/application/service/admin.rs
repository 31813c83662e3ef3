use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use super::resource_path;
use crate::application::client::ApiClient;
use crate::domain::admin::{
    AddIpWhitelistRequest, AdminSettingsResponse, AdminUsersResponse, AppSettingsUpdated,
    AuditLogFilter, AuditLogsResponse, IpWhitelistAdded, IpWhitelistResponse, SecuritySettings,
    SecuritySettingsUpdated, UpdateAppSettingsRequest, UpdateEmailConfigRequest,
    UpdateSecuritySettingsRequest, UpdateUserRolesRequest, UserFilter,
};
use crate::domain::{Acknowledgement, AuditEvent};
use crate::error::Result;

const IP_WHITELIST: &str = "/admin/security/ip-whitelist";

/// Admin console: application settings, security, users and audit logs.
pub struct AdminService {
    client: Arc<ApiClient>,
}

impl AdminService {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn audit_change(&self, changed: Value) {
        self.client.record_audit(AuditEvent::admin_settings_update(
            self.client.user_id().as_deref(),
            changed,
        ));
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn settings(&self) -> Result<AdminSettingsResponse> {
        Ok(self.client.get("/admin/settings").await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn update_app_settings(
        &self,
        update: &UpdateAppSettingsRequest,
    ) -> Result<AppSettingsUpdated> {
        let updated: AppSettingsUpdated = self.client.put("/admin/settings/app", update).await?;
        self.audit_change(json!({ "app": update }));
        Ok(updated)
    }

    /// Update SMTP settings. The password never reaches the audit trail.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn update_email_config(
        &self,
        update: &UpdateEmailConfigRequest,
    ) -> Result<Acknowledgement> {
        let ack: Acknowledgement = self.client.put("/admin/settings/email", update).await?;
        let redacted = UpdateEmailConfigRequest {
            smtp_password: None,
            ..update.clone()
        };
        self.audit_change(json!({ "email": redacted }));
        Ok(ack)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn security_settings(&self) -> Result<SecuritySettings> {
        Ok(self.client.get("/admin/security").await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn update_security_settings(
        &self,
        update: &UpdateSecuritySettingsRequest,
    ) -> Result<SecuritySettingsUpdated> {
        let updated: SecuritySettingsUpdated =
            self.client.put("/admin/security", update).await?;
        self.audit_change(json!({ "security": update }));
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn ip_whitelist(&self) -> Result<IpWhitelistResponse> {
        Ok(self.client.get(IP_WHITELIST).await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn add_ip(&self, entry: &AddIpWhitelistRequest) -> Result<IpWhitelistAdded> {
        let added: IpWhitelistAdded = self.client.post(IP_WHITELIST, entry).await?;
        info!(ip = %entry.ip_address, "IP whitelisted");
        self.audit_change(json!({ "ipWhitelistAdded": entry.ip_address }));
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`](crate::error::ApiError::InvalidRequest)
    /// for an unusable id, otherwise the pipeline error.
    pub async fn remove_ip(&self, id: &str) -> Result<Acknowledgement> {
        let path = resource_path(IP_WHITELIST, id)?;
        let ack: Acknowledgement = self.client.delete(&path).await?;
        info!(id = %id, "IP removed from whitelist");
        self.audit_change(json!({ "ipWhitelistRemoved": id }));
        Ok(ack)
    }

    /// `GET /admin/users` with the given filters.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn users(&self, filter: &UserFilter) -> Result<AdminUsersResponse> {
        Ok(self.client.get(&filter.to_path()).await?)
    }

    /// Replace a user's roles.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`](crate::error::ApiError::InvalidRequest)
    /// for an unusable id, otherwise the pipeline error.
    pub async fn update_user_roles(
        &self,
        user_id: &str,
        roles: Vec<String>,
    ) -> Result<Acknowledgement> {
        let path = format!("{}/roles", resource_path("/admin/users", user_id)?);
        let request = UpdateUserRolesRequest { roles };
        let ack: Acknowledgement = self.client.put(&path, &request).await?;
        info!(user = %user_id, roles = ?request.roles, "User roles updated");
        self.client.record_audit(AuditEvent::user_role_change(
            self.client.user_id().as_deref(),
            user_id,
            &request.roles,
        ));
        Ok(ack)
    }

    /// `GET /admin/audit-logs` with the given filters.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn audit_logs(&self, filter: &AuditLogFilter) -> Result<AuditLogsResponse> {
        Ok(self.client.get(&filter.to_path()).await?)
    }
}
