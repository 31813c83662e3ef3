//! Superpi - client for a trading-signal subscription service.
//!
//! Every piece of data comes from a remote REST API. The crate validates
//! input, calls the API through a single request pipeline and hands typed
//! results back to the caller.
//!
//! # Architecture
//!
//! - **`domain`** - Wire types for each API area, audit events, query
//!   building and form validation
//! - **`port`** - Traits for the pipeline's collaborators (transport, token
//!   store, audit sink, auth-rejected handler)
//! - **`adapter`** - reqwest transport, token stores, audit sinks, sign-in
//!   redirect and the CLI
//! - **`application`** - The request pipeline ([`application::ApiClient`]),
//!   session state, retry policy and one service facade per API area
//! - **`infrastructure`** - TOML configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use superpi::adapter::outbound::navigation::SignInRedirect;
//! use superpi::application::service::Services;
//! use superpi::domain::signal::{SignalFilter, SignalStatus};
//! use superpi::infrastructure::bootstrap;
//! use superpi::infrastructure::config::settings::Config;
//!
//! # async fn run() -> superpi::error::Result<()> {
//! let config = Config::load_or_default("config.toml")?;
//! let wiring = bootstrap::build_client(&config, Arc::new(SignInRedirect::default()));
//! let services = Services::new(Arc::new(wiring.client));
//!
//! let filter = SignalFilter {
//!     status: Some(SignalStatus::Active),
//!     page_size: Some(10),
//!     ..Default::default()
//! };
//! let page = services.signals.list(&filter).await?;
//! println!("{} active signals", page.pagination.total_items);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
