use thiserror::Error;

use crate::domain::error::ValidationErrors;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Broad classification of an [`ApiError`].
///
/// Retry policy is decided from this value, never from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response arrived before the per-attempt deadline.
    Timeout,
    /// Connection refused, DNS failure, reset, and similar transport faults.
    Network,
    /// The server answered with a 5xx status.
    Server,
    /// The server answered 401.
    Unauthorized,
    /// The server answered with any other non-success status.
    Rejected,
    /// A success status whose body did not parse into the expected shape.
    Parse,
    /// The request could not be built (bad URL, unserializable body).
    InvalidRequest,
}

/// Failure of a single logical API call.
///
/// Display output is the human-readable message callers show to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request timeout - please try again")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unauthorized - please log in again")]
    Unauthorized,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout => ErrorKind::Timeout,
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Parse(_) => ErrorKind::Parse,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Check if this error is transient and the attempt may be repeated.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Timeout | ErrorKind::Network | ErrorKind::Server
        )
    }

    /// HTTP status carried by this error, if the server responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("session storage error: {0}")]
    Session(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_kinds_are_retryable() {
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::Network("connection refused".into()).is_retryable());
        assert!(ApiError::Server {
            status: 503,
            message: "Service Unavailable".into()
        }
        .is_retryable());
    }

    #[test]
    fn terminal_kinds_are_not_retryable() {
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Rejected {
            status: 422,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!ApiError::Parse("expected value".into()).is_retryable());
        assert!(!ApiError::InvalidRequest("bad url".into()).is_retryable());
    }

    #[test]
    fn retry_does_not_depend_on_message_text() {
        let err = ApiError::Rejected {
            status: 400,
            message: "network timeout while fetching".into(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ApiError::Timeout.to_string(),
            "Request timeout - please try again"
        );
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Unauthorized - please log in again"
        );
        let err = ApiError::Rejected {
            status: 404,
            message: "Signal not found".into(),
        };
        assert_eq!(err.to_string(), "Signal not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn api_error_is_transparent_in_crate_error() {
        let err: Error = ApiError::Unauthorized.into();
        assert_eq!(err.to_string(), "Unauthorized - please log in again");
    }
}
