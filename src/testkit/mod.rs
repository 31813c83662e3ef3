//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`] - `ScriptedTransport`, a mock [`HttpTransport`](crate::port::outbound::transport::HttpTransport)
//!   with pre-loaded replies and a request log.
//! - [`audit`] - `RecordingAuditSink` and `RecordingAuthRejected` for asserting side effects.
//! - [`fixtures`] - JSON bodies for the common endpoints and a client builder.

pub mod audit;
pub mod fixtures;
pub mod transport;
