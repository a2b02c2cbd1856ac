use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths::PathManager;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com";
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (in characters) clear the results instead of searching
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Delay before a search is sent; a newer query within the window replaces it
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Query to run when an interactive session starts
    #[serde(default)]
    pub initial_query: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            debounce_ms: default_debounce_ms(),
            initial_query: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config file if there is one, defaults otherwise.
    pub fn load_or_default(path_manager: &PathManager) -> anyhow::Result<Self> {
        let path = path_manager.config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let config = Self::load_from_file(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.min_query_len == 0 {
            return Err(anyhow::anyhow!("search.min_query_len must be at least 1"));
        }

        if self.omdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_secs must be greater than 0"));
        }

        let base_url = self.omdb.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "omdb.base_url must be an http(s) URL, got '{}'",
                self.omdb.base_url
            ));
        }

        Ok(())
    }
}
