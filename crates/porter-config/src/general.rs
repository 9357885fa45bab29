//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Serve the fixed example dataset instead of calling the backend.
    #[serde(default)]
    pub example_mode: bool,

    /// Building used when a command does not name one and the session
    /// profile carries none.
    #[serde(default)]
    pub default_building_id: Option<u64>,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            example_mode: false,
            default_building_id: None,
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(!config.example_mode);
        assert!(config.default_building_id.is_none());
        assert_eq!(config.default_limit, 20);
    }
}
