//! Reaction to the server rejecting the session.

/// Called by the pipeline after a 401, once the session has been cleared.
pub trait AuthRejectedHandler: Send + Sync {
    /// `endpoint` is the path of the request that was rejected.
    fn on_auth_rejected(&self, endpoint: &str);
}

/// Handler that does nothing.
pub struct IgnoreAuthRejected;

impl AuthRejectedHandler for IgnoreAuthRejected {
    fn on_auth_rejected(&self, _endpoint: &str) {}
}
