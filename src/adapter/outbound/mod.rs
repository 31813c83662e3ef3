//! Outbound adapters (driven side).

pub mod http;
pub mod navigation;
pub mod telemetry;
pub mod token;
