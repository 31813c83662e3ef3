//! Composition root: turns a [`Config`] into a ready [`ApiClient`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::outbound::http::ReqwestTransport;
use crate::adapter::outbound::telemetry::TelemetryAuditSink;
use crate::adapter::outbound::token::{FileTokenStore, MemoryTokenStore};
use crate::application::client::ApiClient;
use crate::infrastructure::config::audit::AuditConfig;
use crate::infrastructure::config::session::SessionConfig;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::audit::{AuditRegistry, LogAuditSink};
use crate::port::outbound::navigation::AuthRejectedHandler;
use crate::port::outbound::token::TokenStore;

/// How long a finishing process waits for queued audit events.
pub const AUDIT_FLUSH_GRACE: Duration = Duration::from_secs(3);

/// Audit sinks built from configuration.
pub struct AuditSinks {
    pub registry: AuditRegistry,
    /// Set when telemetry is enabled; shut it down before the runtime stops.
    pub telemetry: Option<Arc<TelemetryAuditSink>>,
}

/// Build the audit sinks from configuration.
///
/// Must be called from within a tokio runtime when telemetry is enabled.
#[must_use]
pub fn build_audit_sinks(config: &AuditConfig) -> AuditSinks {
    let mut registry = AuditRegistry::new();
    if config.log {
        registry.register(Box::new(LogAuditSink));
    }
    let telemetry = config.telemetry_url.as_ref().map(|url| {
        let sink = Arc::new(TelemetryAuditSink::new(url.clone(), reqwest::Client::new()));
        registry.register(Box::new(sink.clone()));
        info!(endpoint = %url, "Telemetry audit sink enabled");
        sink
    });
    AuditSinks {
        registry,
        telemetry,
    }
}

/// Pick the token store for the configured session mode.
#[must_use]
pub fn build_token_store(config: &SessionConfig) -> Arc<dyn TokenStore> {
    if !config.persist {
        return Arc::new(MemoryTokenStore::new());
    }
    match config.resolved_path() {
        Some(path) => Arc::new(FileTokenStore::new(path)),
        None => {
            warn!("No home directory for the session file, session will not persist");
            Arc::new(MemoryTokenStore::new())
        }
    }
}

/// A wired client and the telemetry sink feeding off it.
pub struct Wiring {
    pub client: ApiClient,
    pub telemetry: Option<Arc<TelemetryAuditSink>>,
}

/// Wire the request pipeline with its production adapters.
///
/// Must be called from within a tokio runtime when telemetry is enabled.
#[must_use]
pub fn build_client(config: &Config, auth_rejected: Arc<dyn AuthRejectedHandler>) -> Wiring {
    let transport = Arc::new(ReqwestTransport::new(config.api.timeout()));
    let tokens = build_token_store(&config.session);
    let audit = build_audit_sinks(&config.audit);

    info!(
        base_url = %config.api.base_url,
        timeout_ms = config.api.timeout_ms,
        max_retries = config.api.max_retries,
        "API client configured"
    );

    let client = ApiClient::new(config.api.base_url.clone(), transport, tokens)
        .with_audit(Arc::new(audit.registry))
        .with_auth_rejected_handler(auth_rejected)
        .with_retry_policy(config.api.retry_policy())
        .with_timeout(config.api.timeout());

    Wiring {
        client,
        telemetry: audit.telemetry,
    }
}
