//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use super::context::load_config;
use super::{diagnostic, output};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::api::BASE_URL_ENV;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    if output::is_json() {
        output::command_json("config.init", &serde_json::json!({ "path": path }));
        return Ok(());
    }
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} and set api.base_url", path.display()));
    output::note(&format!(
        "2. Or export {BASE_URL_ENV} to override it per shell"
    ));
    output::note("3. Run: superpi auth login --email <address>");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> miette::Result<()> {
    let config = load_config(path)?;

    if output::is_json() {
        output::command_json("config.show", &config);
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        if path.exists() {
            path.display().to_string()
        } else {
            "(defaults)".to_string()
        },
    );

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    if std::env::var(BASE_URL_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        output::note(&format!("base URL taken from {BASE_URL_ENV}"));
    }
    output::field("Timeout", format!("{}ms", config.api.timeout_ms));
    output::field(
        "Retries",
        format!(
            "{} (backoff {}ms x attempt)",
            config.api.max_retries, config.api.retry_delay_ms
        ),
    );

    output::section("Session");
    output::field("Persist", output::yes_no(config.session.persist));
    if let Some(session_path) = config.session.resolved_path() {
        output::field("File", session_path.display());
    }

    output::section("Audit");
    output::field("Log", output::yes_no(config.audit.log));
    output::field(
        "Telemetry",
        config.audit.telemetry_url.as_deref().unwrap_or("disabled"),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> miette::Result<()> {
    if !output::is_json() {
        output::section("Config Validation");
        output::field("Path", path.display());
    }
    if !path.exists() {
        return Err(diagnostic::report(
            ConfigError::ReadFile(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))
            .into(),
        ));
    }
    load_config(path)?;

    if output::is_json() {
        output::command_json(
            "config.validate",
            &serde_json::json!({ "path": path, "valid": true }),
        );
        return Ok(());
    }
    output::success("Config file is valid");
    output::field(
        "Next",
        format!("superpi config show -c {}", path.display()),
    );
    Ok(())
}
