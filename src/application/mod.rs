//! Application services (use cases).
//!
//! The request pipeline owns session state and talks to the outside world
//! through ports; the service facades turn typed domain calls into pipeline
//! requests.

pub mod client;
pub mod retry;
pub mod service;
pub mod session;

pub use client::ApiClient;
pub use retry::RetryPolicy;
pub use session::Session;
