//! Audit delivery settings.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Write audit events to the tracing log.
    #[serde(default = "default_true")]
    pub log: bool,
    /// Collector that receives audit events as JSON POSTs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry_url: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log: default_true(),
            telemetry_url: None,
        }
    }
}
