pub mod config;
pub mod interactive;
pub mod loading;
pub mod prompts;
pub mod search;
pub mod show;

use std::sync::Arc;

use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use popcorn_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use popcorn_sources::OmdbClient;

/// Load config.toml (defaults when absent) from the standard location.
pub fn load_config() -> Result<(PathManager, Config)> {
    let path_manager = PathManager::default();
    let config = Config::load_or_default(&path_manager)
        .map_err(|e| eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to load config from {}", path_manager.config_file().display()))?;
    Ok((path_manager, config))
}

/// Build the OMDb client from the stored (or environment) API key.
pub fn open_catalog(path_manager: &PathManager, config: &Config) -> Result<Arc<OmdbClient>> {
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials.load().map_err(|e| eyre!("Failed to read credentials: {}", e))?;

    let api_key = credentials.resolve_omdb_api_key().ok_or_else(|| {
        eyre!(
            "No OMDb API key configured. Run 'popcorn config set --api-key <KEY>' or set {}",
            API_KEY_ENV
        )
    })?;

    let client = OmdbClient::new(api_key, &config.omdb)?;
    Ok(Arc::new(client))
}
