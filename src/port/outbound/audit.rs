//! Audit sink port.
//!
//! Sinks receive [`AuditEvent`]s from the pipeline and the service facades.
//! Delivery is fire-and-forget: a sink never blocks and never fails from
//! the caller's point of view.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::AuditEvent;

/// Receiver of audit events.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `record` must return quickly; slow delivery belongs on a background task
pub trait AuditSink: Send + Sync {
    /// Handle one event.
    fn record(&self, event: AuditEvent);
}

/// Registry of sinks (composite pattern).
///
/// Broadcasts each event to every registered sink.
pub struct AuditRegistry {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl AuditRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { sinks: vec![] }
    }

    /// Register a sink.
    pub fn register(&mut self, sink: Box<dyn AuditSink>) {
        self.sinks.push(sink);
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for AuditRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for AuditRegistry {
    fn record(&self, event: AuditEvent) {
        for sink in &self.sinks {
            sink.record(event.clone());
        }
    }
}

/// A shared sink, so a caller can keep a handle to a sink it registered.
impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    fn record(&self, event: AuditEvent) {
        (**self).record(event);
    }
}

/// A no-op sink for when auditing is disabled.
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: AuditEvent) {}
}

/// Writes events to the tracing log.
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, event: AuditEvent) {
        let user = event.user_id.as_deref().unwrap_or("-");
        let resource = event.resource.as_deref().unwrap_or("-");
        if event.success {
            info!(
                event = %event.event_type,
                user = %user,
                resource = %resource,
                action = %event.action,
                "Audit"
            );
        } else {
            warn!(
                event = %event.event_type,
                user = %user,
                resource = %resource,
                action = %event.action,
                error = event.error_message.as_deref().unwrap_or(""),
                "Audit"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::AuditEventType;

    struct Counting(Arc<Mutex<Vec<AuditEventType>>>);

    impl AuditSink for Counting {
        fn record(&self, event: AuditEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[test]
    fn registry_broadcasts_to_every_sink() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let mut registry = AuditRegistry::new();
        registry.register(Box::new(Counting(first.clone())));
        registry.register(Box::new(NullAuditSink));
        registry.register(Box::new(Counting(second.clone())));
        assert_eq!(registry.len(), 3);

        registry.record(AuditEvent::logout(Some("u-1")));

        assert_eq!(*first.lock().unwrap(), vec![AuditEventType::Logout]);
        assert_eq!(*second.lock().unwrap(), vec![AuditEventType::Logout]);
    }

    #[test]
    fn empty_registry_accepts_events() {
        let registry = AuditRegistry::default();
        assert!(registry.is_empty());
        registry.record(AuditEvent::logout(None));
    }

    #[test]
    fn shared_sink_sees_registry_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::new(Counting(seen.clone()));

        let mut registry = AuditRegistry::new();
        registry.register(Box::new(sink.clone()));
        registry.record(AuditEvent::logout(None));
        sink.record(AuditEvent::logout(None));

        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
