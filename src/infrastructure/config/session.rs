//! Session token persistence settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keep the token on disk between runs. When false the session lives
    /// only as long as the process.
    #[serde(default = "default_true")]
    pub persist: bool,
    /// Session file; defaults to `~/.superpi/session.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// Session file location, if one can be determined.
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".superpi").join("session.json")))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: default_true(),
            path: None,
        }
    }
}
