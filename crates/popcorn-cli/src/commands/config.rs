use super::prompts;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(&path_manager, full, output),
        crate::ConfigCommands::Set {
            api_key,
            base_url,
            timeout_secs,
            min_query_len,
            debounce_ms,
            initial_query,
        } => {
            let update = SettingsUpdate {
                api_key,
                base_url,
                timeout_secs,
                min_query_len,
                debounce_ms,
                initial_query,
            };
            let update = if update.is_empty() {
                prompt_for_update(&path_manager, output)?
            } else {
                update
            };
            let changed = apply_update(&path_manager, update)?;
            if changed.is_empty() {
                output.info("Nothing changed.");
            } else {
                output.success(format!("Updated {}", changed.join(", ")));
            }
            Ok(())
        }
        crate::ConfigCommands::Path => show_paths(&path_manager, output),
    }
}

/// Settings to change; `None` leaves the stored value alone.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub min_query_len: Option<usize>,
    pub debounce_ms: Option<u64>,
    pub initial_query: Option<String>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.base_url.is_none()
            && self.timeout_secs.is_none()
            && self.min_query_len.is_none()
            && self.debounce_ms.is_none()
            && self.initial_query.is_none()
    }
}

/// Validate and persist an update. Returns the names of the settings written.
///
/// The API key goes to credentials.toml, everything else to config.toml.
/// An empty API key or initial query clears the stored value.
pub fn apply_update(path_manager: &PathManager, update: SettingsUpdate) -> Result<Vec<&'static str>> {
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = Config::load_or_default(path_manager).map_err(|e| eyre!("{}", e))?;
    let mut changed = Vec::new();

    if let Some(base_url) = update.base_url {
        config.omdb.base_url = base_url.trim().trim_end_matches('/').to_string();
        changed.push("base URL");
    }
    if let Some(timeout_secs) = update.timeout_secs {
        config.omdb.timeout_secs = timeout_secs;
        changed.push("timeout");
    }
    if let Some(min_query_len) = update.min_query_len {
        config.search.min_query_len = min_query_len;
        changed.push("minimum query length");
    }
    if let Some(debounce_ms) = update.debounce_ms {
        config.search.debounce_ms = debounce_ms;
        changed.push("debounce");
    }
    if let Some(initial_query) = update.initial_query {
        let initial_query = initial_query.trim().to_string();
        config.search.initial_query = if initial_query.is_empty() {
            None
        } else {
            Some(initial_query)
        };
        changed.push("initial query");
    }

    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    if !changed.is_empty() {
        config
            .save_to_file(&path_manager.config_file())
            .map_err(|e| eyre!("Failed to save config: {}", e))?;
    }

    if let Some(api_key) = update.api_key {
        let api_key = api_key.trim().to_string();
        let mut credentials = CredentialStore::new(path_manager.credentials_file());
        credentials.load().map_err(|e| eyre!("Failed to read credentials: {}", e))?;
        if api_key.is_empty() {
            credentials.clear_omdb_api_key();
        } else {
            credentials.set_omdb_api_key(api_key);
        }
        credentials.save().map_err(|e| eyre!("Failed to save credentials: {}", e))?;
        changed.push("API key");
    }

    Ok(changed)
}

fn prompt_for_update(path_manager: &PathManager, output: &Output) -> Result<SettingsUpdate> {
    if output.is_json() {
        return Err(eyre!("Pass at least one setting flag when using JSON output"));
    }

    let config = Config::load_or_default(path_manager).map_err(|e| eyre!("{}", e))?;

    output.info("Get a free key at https://www.omdbapi.com/apikey.aspx");
    let api_key = prompts::prompt_password("OMDb API key (leave empty to keep)")?;
    let base_url = prompts::prompt_string("OMDb base URL", Some(&config.omdb.base_url))?;
    let timeout_secs = prompts::prompt_number("Request timeout (seconds)", Some(config.omdb.timeout_secs), output)?;
    let min_query_len = prompts::prompt_number(
        "Minimum query length",
        Some(config.search.min_query_len as u64),
        output,
    )?;
    let debounce_ms = prompts::prompt_number("Search debounce (ms)", Some(config.search.debounce_ms), output)?;
    let initial_query = prompts::prompt_string(
        "Initial query for interactive sessions (empty for none)",
        config.search.initial_query.as_deref(),
    )?;

    Ok(SettingsUpdate {
        api_key: Some(api_key).filter(|key| !key.trim().is_empty()),
        base_url: Some(base_url),
        timeout_secs: Some(timeout_secs),
        min_query_len: Some(min_query_len as usize),
        debounce_ms: Some(debounce_ms),
        initial_query: Some(initial_query),
    })
}

fn show_config(path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(path_manager)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials.load().map_err(|e| eyre!("Failed to read credentials: {}", e))?;
    let env_override = std::env::var(API_KEY_ENV).is_ok();
    let api_key = credentials.resolve_omdb_api_key().unwrap_or_default();
    let api_key_display = if full { api_key } else { mask_string(&api_key) };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                println!("{}", "No config file yet, showing defaults.".bright_black());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![
                Cell::new("API Key"),
                Cell::new(if env_override {
                    format!("{} (from {})", api_key_display, API_KEY_ENV)
                } else {
                    api_key_display
                }),
            ]);
            table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.omdb.base_url)]);
            table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.omdb.timeout_secs))]);
            table.add_row(vec![Cell::new("Min Query Length"), Cell::new(config.search.min_query_len)]);
            table.add_row(vec![Cell::new("Debounce"), Cell::new(format!("{}ms", config.search.debounce_ms))]);
            table.add_row(vec![
                Cell::new("Initial Query"),
                Cell::new(config.search.initial_query.as_deref().unwrap_or("<none>")),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        _ => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "api_key": api_key_display,
                "api_key_from_env": env_override,
                "omdb": config.omdb,
                "search": config.search,
            }));
        }
    }

    Ok(())
}

fn show_paths(path_manager: &PathManager, output: &Output) -> Result<()> {
    if output.is_json() {
        output.json(&json!({
            "config_dir": path_manager.config_dir().display().to_string(),
            "config_file": path_manager.config_file().display().to_string(),
            "credentials_file": path_manager.credentials_file().display().to_string(),
            "log_dir": path_manager.log_dir().display().to_string(),
        }));
    } else {
        output.info(format!("Config:      {}", path_manager.config_file().display()));
        output.info(format!("Credentials: {}", path_manager.credentials_file().display()));
        output.info(format!("Logs:        {}", path_manager.log_dir().display()));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
