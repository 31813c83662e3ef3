//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! the API base URL can be overridden with `SUPERPI_API_BASE_URL`.
//!
//! # Example
//!
//! ```no_run
//! use superpi::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::api::{ApiConfig, BASE_URL_ENV};
use super::audit::AuditConfig;
use super::logging::LoggingConfig;
use super::session::SessionConfig;
use crate::error::{ConfigError, Result};

/// Upper bound on configured retries; beyond this a single call could
/// stall for minutes.
const MAX_RETRIES_LIMIT: u32 = 10;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend API connection and retry settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the session token is kept.
    #[serde(default)]
    pub session: SessionConfig,

    /// Audit event delivery.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise start from defaults. Either
    /// way environment overrides and validation apply.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is invalid or the resulting
    /// configuration fails validation.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        debug!(path = %path.display(), "No config file, using defaults");
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Override the base URL from the environment, if set and non-empty.
    fn apply_env(&mut self) {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            debug!(base_url = %url, "Base URL overridden from environment");
            self.api.base_url = url;
        }
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        validate_http_url("base_url", &self.api.base_url)?;

        if self.api.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.api.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "max_retries",
                reason: format!("must be at most {MAX_RETRIES_LIMIT}"),
            }
            .into());
        }

        if let Some(ref telemetry_url) = self.audit.telemetry_url {
            validate_http_url("telemetry_url", telemetry_url)?;
        }

        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LoggingConfig::FORMATS.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

#[allow(clippy::result_large_err)]
fn validate_http_url(field: &'static str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
        }
        .into());
    }
    Ok(())
}
