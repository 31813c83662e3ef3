//! Recording implementations of the side-effect ports.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{AuditEvent, AuditEventType};
use crate::port::outbound::audit::AuditSink;
use crate::port::outbound::navigation::AuthRejectedHandler;

/// Audit sink that keeps every event. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<AuditEventType> {
        self.events.lock().iter().map(|e| e.event_type).collect()
    }

    pub fn count(&self, event_type: AuditEventType) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events.lock().push(event);
    }
}

/// Auth-rejected handler that remembers which endpoints triggered it.
#[derive(Clone, Default)]
pub struct RecordingAuthRejected {
    endpoints: Arc<Mutex<Vec<String>>>,
}

impl RecordingAuthRejected {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().clone()
    }
}

impl AuthRejectedHandler for RecordingAuthRejected {
    fn on_auth_rejected(&self, endpoint: &str) {
        self.endpoints.lock().push(endpoint.to_string());
    }
}
