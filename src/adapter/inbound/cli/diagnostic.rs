//! Miette-based error diagnostics for CLI error presentation.
//!
//! Crate errors are converted into diagnostics with help text pointing at
//! the command that fixes them. Config parse errors carry the file content
//! and a labeled span.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ApiError, ConfigError, Error, ErrorKind};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(superpi::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build from a TOML parse error over `src`, if it reports a span.
    #[must_use]
    pub fn from_toml(err: &toml::de::Error, src: &str) -> Option<Self> {
        let span = err.span()?;
        Some(
            Self::new(err.message(), src, span.start, span.len().max(1))
                .with_help("see `superpi config init` for a documented template"),
        )
    }
}

/// A failed API call.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(superpi::api))]
pub struct ApiDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl From<&ApiError> for ApiDiagnostic {
    fn from(err: &ApiError) -> Self {
        let help = match err.kind() {
            ErrorKind::Unauthorized => Some("run `superpi auth login` to start a new session"),
            ErrorKind::Timeout | ErrorKind::Network => {
                Some("check your network connection and `api.base_url`")
            }
            ErrorKind::Server => Some("the service is having trouble; try again later"),
            ErrorKind::Parse => Some("the server reply did not match the expected shape"),
            ErrorKind::Rejected | ErrorKind::InvalidRequest => None,
        };
        Self {
            message: err.to_string(),
            help: help.map(str::to_string),
        }
    }
}

/// Form input that failed validation, one line per field.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid input")]
#[diagnostic(code(superpi::validation))]
pub struct ValidationDiagnostic {
    #[help]
    pub help: String,
}

/// Anything else, with an optional hint.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(superpi::error))]
pub struct GeneralDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Convert a crate error into a renderable report.
#[must_use]
pub fn report(err: Error) -> miette::Report {
    match err {
        Error::Api(ref api) => ApiDiagnostic::from(api).into(),
        Error::Validation(errors) => ValidationDiagnostic {
            help: errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        }
        .into(),
        Error::Config(ConfigError::ReadFile(ref io)) => GeneralDiagnostic {
            message: format!("failed to read config file: {io}"),
            help: Some("create one with `superpi config init`".into()),
        }
        .into(),
        Error::Config(ref config) => GeneralDiagnostic {
            message: config.to_string(),
            help: Some("run `superpi config validate` for details".into()),
        }
        .into(),
        Error::Session(ref message) => GeneralDiagnostic {
            message: format!("session storage error: {message}"),
            help: Some("check permissions on the session file under ~/.superpi".into()),
        }
        .into(),
        other => GeneralDiagnostic {
            message: other.to_string(),
            help: None,
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationErrors;

    #[test]
    fn unauthorized_suggests_login() {
        let diag = ApiDiagnostic::from(&ApiError::Unauthorized);
        assert_eq!(diag.message, "Unauthorized - please log in again");
        assert!(diag.help.unwrap().contains("auth login"));
    }

    #[test]
    fn rejected_has_no_help() {
        let diag = ApiDiagnostic::from(&ApiError::Rejected {
            status: 404,
            message: "Signal not found".into(),
        });
        assert_eq!(diag.message, "Signal not found");
        assert!(diag.help.is_none());
    }

    #[test]
    fn toml_error_points_at_span() {
        let src = "[api]\ntimeout_ms = = 5\n";
        let err = toml::from_str::<toml::Value>(src).unwrap_err();
        let diag = ConfigDiagnostic::from_toml(&err, src).unwrap();
        assert!(diag.help.is_some());
        assert!(diag.span.offset() >= "[api]\n".len());
    }

    #[test]
    fn validation_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Invalid email address");
        errors.push("password", "Password is required");

        let report = report(Error::Validation(errors));
        let diag = report.downcast_ref::<ValidationDiagnostic>().unwrap();
        assert!(diag.help.contains("email: Invalid email address"));
        assert!(diag.help.contains("password: Password is required"));
    }
}
