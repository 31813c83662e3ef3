//! Accounts, sessions and profiles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<String>,
}

impl User {
    /// "First Last", falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Reply from register, login and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateProfileRequest {
    /// Wire names of the fields this update carries.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = vec!["firstName", "lastName"];
        if self.phone.is_some() {
            fields.push("phone");
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdated {
    pub success: bool,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRolesResponse {
    pub roles: Vec<String>,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_tolerates_missing_fields() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success": false, "error": "Invalid credentials"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.token, None);
        assert_eq!(response.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn register_request_is_camel_case() {
        let request = RegisterRequest {
            email: "jane@example.com".into(),
            password: "S3cret!pass".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = User {
            id: "u1".into(),
            email: "jane@example.com".into(),
            first_name: None,
            last_name: None,
            phone: None,
            roles: vec![],
            created_at: "2024-01-01T00:00:00Z".into(),
            last_sign_in_at: None,
        };
        assert_eq!(user.display_name(), "jane@example.com");

        let named = User {
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            ..user
        };
        assert_eq!(named.display_name(), "Jane Doe");
    }
}
