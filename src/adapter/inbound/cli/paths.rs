//! Path utilities for superpi.
//!
//! All local state lives under `~/.superpi/`:
//! - `~/.superpi/config.toml` - main configuration
//! - `~/.superpi/session.json` - persisted session token

use std::path::PathBuf;

/// Returns the superpi home directory (`~/.superpi/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".superpi")
}

/// Returns the default config file path (`~/.superpi/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_superpi_home() {
        let home = home_dir();
        let config = default_config();

        assert!(home.to_string_lossy().contains(".superpi"));
        assert!(config.starts_with(&home));
        assert_eq!(config.file_name().unwrap(), "config.toml");
    }
}
