//! The request pipeline.
//!
//! [`ApiClient`] turns a logical [`ApiRequest`] into one or more HTTP
//! attempts. Each attempt gets the current session headers, its own
//! deadline and exactly one audit event. Transient failures are retried
//! with linear backoff; a 401 ends the session.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::retry::RetryPolicy;
use super::session::Session;
use crate::domain::{ApiRequest, AttemptRecord, AuditEvent, ErrorBody};
use crate::error::{ApiError, Result};
use crate::port::outbound::audit::{AuditSink, NullAuditSink};
use crate::port::outbound::navigation::{AuthRejectedHandler, IgnoreAuthRejected};
use crate::port::outbound::token::TokenStore;
use crate::port::outbound::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Default per-attempt deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Message used when a failed response carries no usable description.
const FALLBACK_MESSAGE: &str = "API request failed";

/// Outcome of one attempt, with the status the server answered (if any).
struct Attempt<T> {
    status: Option<u16>,
    result: std::result::Result<T, ApiError>,
}

/// HTTP client for the backend API.
///
/// Shared by every service facade; cheap to wrap in an `Arc`.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    session: Session,
    audit: Arc<dyn AuditSink>,
    auth_rejected: Arc<dyn AuthRejectedHandler>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client. The stored token, if any, is loaded immediately.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session: Session::new(tokens),
            audit: Arc::new(NullAuditSink),
            auth_rejected: Arc::new(IgnoreAuthRejected),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Send audit events to `audit` instead of discarding them.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Notify `handler` whenever the server answers 401.
    #[must_use]
    pub fn with_auth_rejected_handler(mut self, handler: Arc<dyn AuthRejectedHandler>) -> Self {
        self.auth_rejected = handler;
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Session -----------------------------------------------------------

    /// Persist and adopt a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store rejects the write.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.session.set_token(token)
    }

    /// Forget the token and user id.
    pub fn clear_token(&self) {
        self.session.clear();
    }

    /// Current bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Whether a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Remember the signed-in user for audit events.
    pub fn set_user_id(&self, user_id: Option<String>) {
        self.session.set_user_id(user_id);
    }

    /// Id of the signed-in user, if known.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.session.user_id()
    }

    /// Forward a domain event to the audit sink.
    pub fn record_audit(&self, event: AuditEvent) {
        self.audit.record(event);
    }

    // --- Requests ----------------------------------------------------------

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ApiError> {
        self.request(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(ApiRequest::post(path).with_json(body)?).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(ApiRequest::put(path).with_json(body)?).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, ApiError> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Execute a logical request and parse the JSON reply into `T`.
    ///
    /// Timeouts, network failures and 5xx replies are retried according to
    /// the retry policy; the last error is returned once retries run out.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401, after the session was cleared
    /// - [`ApiError::Rejected`] for any other non-success status
    /// - [`ApiError::Server`], [`ApiError::Timeout`], [`ApiError::Network`]
    ///   when retries are exhausted
    /// - [`ApiError::Parse`] when a success body does not match `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<T, ApiError> {
        let body = request
            .body()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let url = format!("{}{}", self.base_url, request.path());
        let call_id = Uuid::new_v4().to_string();
        let mut retries = 0;

        loop {
            let attempt_number = retries + 1;
            let started = Instant::now();
            let attempt = self.attempt::<T>(&request, &url, body.clone()).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            let user_id = self.session.user_id();
            self.audit.record(AuditEvent::api_attempt(&AttemptRecord {
                endpoint: request.path(),
                method: request.method(),
                status: attempt.status,
                error: attempt.result.as_ref().err().map(ToString::to_string),
                elapsed_ms,
                attempt: attempt_number,
                call_id: &call_id,
                user_id: user_id.as_deref(),
            }));

            let error = match attempt.result {
                Ok(value) => {
                    debug!(
                        method = %request.method(),
                        path = request.path(),
                        status = attempt.status,
                        elapsed_ms,
                        attempt = attempt_number,
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(error) => error,
            };

            if error == ApiError::Unauthorized {
                self.reject_session(request.path(), user_id.as_deref());
                return Err(error);
            }

            if !self.retry.should_retry(&error, retries) {
                warn!(
                    method = %request.method(),
                    path = request.path(),
                    attempt = attempt_number,
                    error = %error,
                    "Request failed"
                );
                return Err(error);
            }

            retries += 1;
            let delay = self.retry.delay_for(retries);
            warn!(
                method = %request.method(),
                path = request.path(),
                attempt = attempt_number,
                max_attempts = self.retry.max_attempts(),
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "Request failed, retrying"
            );
            sleep(delay).await;
        }
    }

    /// Run a single attempt: compose headers, send under the deadline and
    /// classify the reply.
    async fn attempt<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        url: &str,
        body: Option<String>,
    ) -> Attempt<T> {
        let http_request = HttpRequest {
            method: request.method(),
            url: url.to_string(),
            headers: self.compose_headers(request.headers()),
            body,
        };

        let response = match timeout(self.timeout, self.transport.send(http_request)).await {
            Err(_) | Ok(Err(TransportError::Timeout)) => {
                return Attempt {
                    status: None,
                    result: Err(ApiError::Timeout),
                }
            }
            Ok(Err(e)) => {
                return Attempt {
                    status: None,
                    result: Err(ApiError::Network(e.to_string())),
                }
            }
            Ok(Ok(response)) => response,
        };

        Attempt {
            status: Some(response.status),
            result: classify(&response),
        }
    }

    /// Default headers, with the token read now, overridden by the caller's
    /// headers of the same (case-insensitive) name.
    fn compose_headers(&self, overrides: &[(String, String)]) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        for (name, value) in overrides {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }
        headers
    }

    /// End the session after a 401.
    fn reject_session(&self, endpoint: &str, user_id: Option<&str>) {
        info!(endpoint = %endpoint, "Session rejected by server, clearing token");
        self.session.clear();
        self.auth_rejected.on_auth_rejected(endpoint);
        self.audit
            .record(AuditEvent::unauthorized_access(endpoint, user_id));
    }
}

/// Map a raw response onto the pipeline's result.
fn classify<T: DeserializeOwned>(response: &HttpResponse) -> std::result::Result<T, ApiError> {
    if response.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if response.is_success() {
        return serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()));
    }

    let status = response.status;
    let message = failure_message(response);
    if (500..600).contains(&status) {
        Err(ApiError::Server { status, message })
    } else {
        Err(ApiError::Rejected { status, message })
    }
}

/// `error.message` from a JSON body; the status text when the body is not
/// JSON; a generic message otherwise.
fn failure_message(response: &HttpResponse) -> String {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(value) => serde_json::from_value::<ErrorBody>(value)
            .ok()
            .and_then(|body| body.message().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        Err(_) if !response.status_text.is_empty() => response.status_text.clone(),
        Err(_) => FALLBACK_MESSAGE.to_string(),
    }
}
