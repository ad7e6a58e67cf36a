use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding records.toml (and the git checkout, if any)
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Write DEBUG-level logs to `<data_path>/tally.log`
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: default_data_path(),
            debug: false,
            git: GitConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_data_path() -> String {
    "~/.local/share/tally".to_string()
}

/// Credentials for the git sync backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub token: String,
}

impl GitConfig {
    /// Sync is attempted only once a username has been set.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}
