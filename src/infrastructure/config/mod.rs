//! Infrastructure configuration modules.

pub mod api;
pub mod audit;
pub mod logging;
pub mod session;
pub mod settings;
