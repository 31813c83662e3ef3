//! Sign-in, sign-up and sign-out against the session and audit trail.

use serde_json::json;
use superpi::application::service::AuthService;
use superpi::domain::auth::{ForgotPasswordRequest, LoginRequest, UpdateProfileRequest};
use superpi::domain::validation::SignupForm;
use superpi::domain::AuditEventType;
use superpi::error::{ApiError, Error};
use superpi::testkit::fixtures::{self, TestClient, BASE_URL};
use superpi::testkit::transport::ScriptedTransport;

fn auth(t: &TestClient) -> AuthService {
    AuthService::new(t.client.clone())
}

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "jane@example.com".into(),
        password: "S3cret!pass".into(),
    }
}

#[tokio::test]
async fn login_stores_token_and_user() {
    let t = TestClient::new(ScriptedTransport::new().respond_json(
        200,
        &fixtures::auth_success("tok-1", "u-1", "jane@example.com"),
    ));

    let response = auth(&t).login(&credentials()).await.unwrap();

    assert!(response.success);
    assert_eq!(t.stored_token().as_deref(), Some("tok-1"));
    assert_eq!(t.client.user_id().as_deref(), Some("u-1"));
    assert!(t.client.is_authenticated());

    let sent = t.transport.last_request().unwrap();
    assert_eq!(sent.url, format!("{BASE_URL}/auth/login"));
    assert_eq!(sent.header("Authorization"), None);

    let login = t
        .audit
        .events()
        .into_iter()
        .find(|e| e.event_type == AuditEventType::Login)
        .unwrap();
    assert_eq!(login.user_id.as_deref(), Some("u-1"));
    assert_eq!(login.user_name.as_deref(), Some("jane@example.com"));
}

#[tokio::test]
async fn refused_login_keeps_session_empty() {
    let t = TestClient::new(ScriptedTransport::new().respond_json(
        200,
        &json!({ "success": false, "error": "Invalid credentials" }),
    ));

    let response = auth(&t).login(&credentials()).await.unwrap();

    assert!(!response.success);
    assert_eq!(t.stored_token(), None);
    let failed = t
        .audit
        .events()
        .into_iter()
        .find(|e| e.event_type == AuditEventType::LoginFailed)
        .unwrap();
    assert_eq!(failed.error_message.as_deref(), Some("Invalid credentials"));
    assert_eq!(t.audit.count(AuditEventType::Login), 0);
}

#[tokio::test]
async fn rejected_login_is_audited_and_returned() {
    let t = TestClient::new(
        ScriptedTransport::new().respond_json(400, &fixtures::error_body("Account locked")),
    );

    let err = auth(&t).login(&credentials()).await.unwrap_err();

    assert_eq!(err.to_string(), "Account locked");
    assert_eq!(t.audit.count(AuditEventType::LoginFailed), 1);
    assert_eq!(t.audit.count(AuditEventType::ApiError), 1);
}

#[tokio::test]
async fn signup_from_validated_form() {
    let t = TestClient::new(ScriptedTransport::new().respond_json(
        201,
        &fixtures::auth_success("tok-new", "u-9", "ravi@example.com"),
    ));

    let request = SignupForm {
        email: " Ravi@Example.com ".into(),
        password: "Str0ng!pass".into(),
        confirm_password: "Str0ng!pass".into(),
        name: Some("Ravi Kumar Sharma".into()),
    }
    .validate()
    .unwrap();
    auth(&t).register(&request).await.unwrap();

    let sent = t.transport.last_request().unwrap();
    assert_eq!(sent.url, format!("{BASE_URL}/auth/register"));
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "ravi@example.com");
    assert_eq!(body["firstName"], "Ravi");
    assert_eq!(body["lastName"], "Kumar Sharma");

    assert_eq!(t.stored_token().as_deref(), Some("tok-new"));
    assert_eq!(t.audit.count(AuditEventType::Signup), 1);
}

#[tokio::test]
async fn logout_clears_session_on_success() {
    let t = TestClient::signed_in(
        ScriptedTransport::new().respond_json(200, &fixtures::ack("Logged out")),
        "tok-1",
    );
    t.client.set_user_id(Some("u-1".into()));

    auth(&t).logout().await.unwrap();

    let sent = t.transport.last_request().unwrap();
    assert_eq!(sent.url, format!("{BASE_URL}/auth/logout"));
    assert_eq!(sent.header("Authorization"), Some("Bearer tok-1"));
    assert_eq!(t.stored_token(), None);
    assert_eq!(t.client.user_id(), None);

    let logout = t
        .audit
        .events()
        .into_iter()
        .find(|e| e.event_type == AuditEventType::Logout)
        .unwrap();
    assert_eq!(logout.user_id.as_deref(), Some("u-1"));
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let t = TestClient::signed_in(
        ScriptedTransport::new().respond_json(400, &fixtures::error_body("Already signed out")),
        "tok-1",
    );

    let err = auth(&t).logout().await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Rejected { status: 400, .. })));
    assert_eq!(t.stored_token(), None);
    assert_eq!(t.audit.count(AuditEventType::Logout), 1);
}

#[tokio::test]
async fn current_user_restores_user_id() {
    let t = TestClient::signed_in(
        ScriptedTransport::new().respond_json(
            200,
            &json!({ "success": true, "user": fixtures::user("u-3", "amy@example.com") }),
        ),
        "tok-3",
    );

    let response = auth(&t).current_user().await.unwrap();

    assert_eq!(response.user.unwrap().email, "amy@example.com");
    assert_eq!(t.client.user_id().as_deref(), Some("u-3"));
}

#[tokio::test]
async fn expired_session_on_me_redirects() {
    let t = TestClient::signed_in(ScriptedTransport::new().respond(401, ""), "stale");

    let err = auth(&t).current_user().await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
    assert_eq!(t.redirects.endpoints(), vec!["/auth/me".to_string()]);
    assert_eq!(t.stored_token(), None);
}

#[tokio::test]
async fn forgot_password_is_audited() {
    let t = TestClient::new(
        ScriptedTransport::new().respond_json(200, &json!({ "success": true })),
    );

    auth(&t)
        .forgot_password(&ForgotPasswordRequest {
            email: "jane@example.com".into(),
        })
        .await
        .unwrap();

    let event = t
        .audit
        .events()
        .into_iter()
        .find(|e| e.event_type == AuditEventType::PasswordReset)
        .unwrap();
    assert_eq!(event.user_name.as_deref(), Some("jane@example.com"));
}

#[tokio::test]
async fn profile_update_audits_changed_fields() {
    let profile = json!({
        "success": true,
        "profile": {
            "id": "p-1",
            "userId": "u-1",
            "firstName": "Jane",
            "lastName": "Smith",
            "email": "jane@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-03-01T00:00:00Z"
        }
    });
    let t = TestClient::signed_in(ScriptedTransport::new().respond_json(200, &profile), "tok-1");

    let update = UpdateProfileRequest {
        first_name: "Jane".into(),
        last_name: "Smith".into(),
        phone: None,
    };
    let updated = auth(&t).update_profile(&update).await.unwrap();

    assert_eq!(updated.profile.last_name, "Smith");
    let event = t
        .audit
        .events()
        .into_iter()
        .find(|e| e.event_type == AuditEventType::ProfileUpdate)
        .unwrap();
    assert_eq!(event.details["fieldsUpdated"], json!(["firstName", "lastName"]));
}
