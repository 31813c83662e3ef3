//! Transport-agnostic domain types.
//!
//! Request and response payloads for every API area, the audit event model,
//! query-string building and form validation. Nothing here performs I/O.

pub mod admin;
pub mod audit;
pub mod auth;
pub mod error;
pub mod portfolio;
pub mod query;
pub mod request;
pub mod response;
pub mod settings;
pub mod signal;
pub mod stock_pick;
pub mod validation;

mod wire;

pub use audit::{AttemptRecord, AuditEvent, AuditEventType};
pub use error::{ValidationError, ValidationErrors};
pub use request::{ApiRequest, Method};
pub use response::{Acknowledgement, ErrorBody, Pagination};
pub use wire::parse_filter;
