//! Optional user configuration loaded from `~/.starboard/config.yaml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_FRIENDS_URL, DEFAULT_SEARCH_BASE_URL, DEFAULT_SEARCH_TIMEOUT_SECS};

const CONFIG_FILE: &str = "config.yaml";

/// Endpoints and limits used by the fetchers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search_base_url: String,
    pub friends_url: String,
    pub search_timeout_secs: u64,
    /// Sent as a bearer token to lift the anonymous search rate limit
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_base_url: String::from(DEFAULT_SEARCH_BASE_URL),
            friends_url: String::from(DEFAULT_FRIENDS_URL),
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            github_token: None,
        }
    }
}

impl Config {
    /// Directory holding the config file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".starboard")
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}
