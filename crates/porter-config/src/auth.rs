//! Session persistence configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_keyring_service() -> String {
    "porter-cli".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Override for the session file. Defaults to `~/.porter/session.json`.
    #[serde(default)]
    pub session_file: Option<String>,

    /// OS keychain service name the bearer token is stored under.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Skip the OS keychain and keep the token in the session file only.
    #[serde(default)]
    pub file_only: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_file: None,
            keyring_service: default_keyring_service(),
            file_only: false,
        }
    }
}

impl AuthConfig {
    /// Resolved session file path, or `None` when no home directory exists.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file.as_ref().map_or_else(
            || dirs::home_dir().map(|home| home.join(".porter").join("session.json")),
            |path| Some(PathBuf::from(path)),
        )
    }
}
