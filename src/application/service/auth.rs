use std::sync::Arc;

use tracing::{info, warn};

use crate::application::client::ApiClient;
use crate::domain::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ProfileUpdated, RegisterRequest,
    UpdateProfileRequest, UserProfile, UserRolesResponse,
};
use crate::domain::{Acknowledgement, ApiRequest, AuditEvent};
use crate::error::Result;

/// Sign-up, sign-in and the signed-in user's profile.
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Adopt the session carried by a successful auth reply.
    fn adopt(&self, response: &AuthResponse) -> Result<bool> {
        let Some(token) = response.token.as_deref().filter(|_| response.success) else {
            return Ok(false);
        };
        self.client.set_token(token)?;
        self.client
            .set_user_id(response.user.as_ref().map(|user| user.id.clone()));
        Ok(true)
    }

    /// `POST /auth/register`; on success the returned session is stored.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error, or a session error if the token could
    /// not be persisted.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.client.post("/auth/register", request).await?;
        if self.adopt(&response)? {
            let user_id = response.user.as_ref().map_or("", |user| user.id.as_str());
            info!(user = %user_id, "Registered");
            self.client
                .record_audit(AuditEvent::signup(user_id, &request.email));
        }
        Ok(response)
    }

    /// `POST /auth/login`; on success the returned session is stored.
    ///
    /// Failed sign-ins are audited whether the server rejected the request
    /// or answered with `success: false`.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error, or a session error if the token could
    /// not be persisted.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let response: AuthResponse = match self.client.post("/auth/login", request).await {
            Ok(response) => response,
            Err(e) => {
                self.client
                    .record_audit(AuditEvent::login_failed(&request.email, &e.to_string()));
                return Err(e.into());
            }
        };

        if self.adopt(&response)? {
            let user_id = response.user.as_ref().map_or("", |user| user.id.as_str());
            info!(user = %user_id, "Logged in");
            self.client
                .record_audit(AuditEvent::login(user_id, &request.email));
        } else {
            let reason = response.error.as_deref().unwrap_or("Login failed");
            warn!(reason = %reason, "Login refused");
            self.client
                .record_audit(AuditEvent::login_failed(&request.email, reason));
        }
        Ok(response)
    }

    /// `POST /auth/logout`. The local session is cleared even when the
    /// server call fails; the failure is still returned.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn logout(&self) -> Result<()> {
        let user_id = self.client.user_id();
        let result = self
            .client
            .request::<Acknowledgement>(ApiRequest::post("/auth/logout"))
            .await;
        self.client.clear_token();
        self.client
            .record_audit(AuditEvent::logout(user_id.as_deref()));
        info!("Logged out");
        result.map(|_| ()).map_err(Into::into)
    }

    /// `GET /auth/me`. Restores the user id for audit events when the
    /// server recognizes the stored token.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn current_user(&self) -> Result<AuthResponse> {
        let response: AuthResponse = self.client.get("/auth/me").await?;
        if let Some(user) = response.user.as_ref().filter(|_| response.success) {
            self.client.set_user_id(Some(user.id.clone()));
        }
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post("/auth/forgot-password", request)
            .await?;
        self.client
            .record_audit(AuditEvent::password_reset(&request.email));
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn profile(&self) -> Result<UserProfile> {
        Ok(self.client.get("/users/profile").await?)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<ProfileUpdated> {
        let updated: ProfileUpdated = self.client.put("/users/profile", update).await?;
        self.client.record_audit(AuditEvent::profile_update(
            self.client.user_id().as_deref(),
            &update.fields(),
        ));
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns the pipeline error.
    pub async fn roles(&self) -> Result<UserRolesResponse> {
        Ok(self.client.get("/users/roles").await?)
    }
}
