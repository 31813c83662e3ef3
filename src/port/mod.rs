//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the request pipeline and the outside world.
//! Adapters implement them; the application layer consumes them.
//!
//! # Available Ports
//!
//! - [`HttpTransport`](outbound::transport::HttpTransport) - Sends one HTTP request
//! - [`TokenStore`](outbound::token::TokenStore) - Durable session token slot
//! - [`AuditSink`](outbound::audit::AuditSink) - Fire-and-forget audit events
//! - [`AuthRejectedHandler`](outbound::navigation::AuthRejectedHandler) - Reaction to a 401

pub mod outbound;
