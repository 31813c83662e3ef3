//! Per-invocation wiring: configuration, logging and the service facades.

use std::fs;
use std::io::{BufRead, IsTerminal};
use std::path::Path;
use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use tracing::debug;

use super::diagnostic::{self, ConfigDiagnostic};
use super::output;
use crate::adapter::outbound::navigation::{SignInRedirect, SIGN_IN_ROUTE};
use crate::adapter::outbound::telemetry::TelemetryAuditSink;
use crate::application::service::Services;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

/// Everything a command handler needs.
pub struct Context {
    pub config: Config,
    pub services: Services,
    pub redirect: Arc<SignInRedirect>,
    telemetry: Option<Arc<TelemetryAuditSink>>,
}

impl Context {
    /// Load configuration, start logging and wire the client.
    ///
    /// `route` is the view the command stands in for; commands under
    /// `auth` pass the sign-in route so a rejected login does not redirect.
    ///
    /// # Errors
    ///
    /// Returns a rendered diagnostic when the configuration is invalid.
    pub fn connect(config_path: &Path, route: &str) -> miette::Result<Self> {
        let mut config = load_config(config_path)?;
        apply_verbosity(&mut config.logging, output::verbosity());
        config.init_logging();
        debug!(path = %config_path.display(), "Configuration loaded");

        let redirect = Arc::new(SignInRedirect::new(route).on_redirect(|_| {
            output::hint("your session has ended; run `superpi auth login` to sign in again");
        }));
        let wiring = bootstrap::build_client(&config, redirect.clone());

        Ok(Self {
            config,
            services: Services::new(Arc::new(wiring.client)),
            redirect,
            telemetry: wiring.telemetry,
        })
    }

    /// Give queued audit events a bounded chance to reach the collector.
    pub async fn finish(self) {
        if let Some(telemetry) = self.telemetry {
            telemetry.shutdown(bootstrap::AUDIT_FLUSH_GRACE).await;
        }
    }

    /// Route for commands that stand in for the sign-in view.
    #[must_use]
    pub const fn sign_in_route() -> &'static str {
        SIGN_IN_ROUTE
    }
}

/// Load configuration from `path`, rendering TOML errors against the file.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns a diagnostic for unreadable, malformed or invalid configuration.
pub fn load_config(path: &Path) -> miette::Result<Config> {
    if !path.exists() {
        return Config::load_or_default(path).map_err(diagnostic::report);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| diagnostic::report(ConfigError::ReadFile(e).into()))?;

    Config::parse_toml(&content).map_err(|err| match err {
        Error::Config(ConfigError::Parse(toml_err)) => {
            match ConfigDiagnostic::from_toml(&toml_err, &content) {
                Some(diag) => diag.into(),
                None => diagnostic::report(ConfigError::Parse(toml_err).into()),
            }
        }
        other => diagnostic::report(other),
    })
}

/// Raise the log level for `-v` flags; `RUST_LOG` still wins.
pub fn apply_verbosity(logging: &mut LoggingConfig, verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    logging.level = level.to_string();
}

/// Read a secret from stdin or prompt for it.
///
/// # Errors
///
/// Returns an IO error if stdin cannot be read or the prompt fails.
pub fn read_secret(from_stdin: bool, prompt: &str) -> Result<String> {
    if from_stdin {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

/// Prompt for a new password twice; stdin mode reads it once.
///
/// Returns `(password, confirmation)`.
///
/// # Errors
///
/// Returns an IO error if stdin cannot be read or the prompt fails.
pub fn read_new_password(from_stdin: bool) -> Result<(String, String)> {
    if from_stdin {
        let password = read_secret(true, "Password")?;
        return Ok((password.clone(), password));
    }
    let theme = ColorfulTheme::default();
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;
    let confirmation = Password::with_theme(&theme)
        .with_prompt("Confirm password")
        .interact()?;
    Ok((password, confirmation))
}

/// Ask for confirmation before a destructive action. JSON and quiet modes
/// never prompt, nor does a non-interactive stdin.
///
/// # Errors
///
/// Returns an IO error if the prompt fails.
pub fn confirm(prompt: &str) -> Result<bool> {
    if output::is_json() || output::is_quiet() || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn verbosity_raises_level() {
        let mut logging = LoggingConfig::default();
        apply_verbosity(&mut logging, 0);
        assert_eq!(logging.level, "warn");

        apply_verbosity(&mut logging, 2);
        assert_eq!(logging.level, "debug");

        apply_verbosity(&mut logging, 5);
        assert_eq!(logging.level, "trace");
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.timeout_ms, 30_000);
    }

    #[test]
    fn malformed_config_renders_span() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nmax_retries = = 1").unwrap();

        let report = load_config(file.path()).unwrap_err();
        assert!(report.downcast_ref::<ConfigDiagnostic>().is_some());
    }

    #[test]
    fn invalid_value_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntimeout_ms = 0").unwrap();

        let report = load_config(file.path()).unwrap_err();
        assert!(report.to_string().contains("timeout_ms"));
    }
}
