//! Loading the session/target configuration.
//!
//! Priority for the file location: `--config` > `$CFCTL_HOME/config.json` >
//! `~/.cfctl/config.json`. `CFCTL_API` and `CFCTL_TOKEN` override the
//! matching fields of whatever was loaded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cfctl_auth::{AccessToken, Configuration};

pub const HOME_ENV: &str = "CFCTL_HOME";
pub const API_ENV: &str = "CFCTL_API";
pub const TOKEN_ENV: &str = "CFCTL_TOKEN";

const FILE_NAME: &str = "config.json";

/// Load the configuration from the process environment.
pub fn load(explicit: Option<&Path>) -> Result<Configuration> {
    let env = |key: &str| std::env::var(key).ok();
    let path = config_path(explicit, env);
    load_from(&path, env)
}

/// Resolve the configuration file location.
pub fn config_path(explicit: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(home) = env(HOME_ENV).filter(|h| !h.trim().is_empty()) {
        return PathBuf::from(home).join(FILE_NAME);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".cfctl").join(FILE_NAME),
        None => PathBuf::from(".cfctl").join(FILE_NAME),
    }
}

/// Read `path` (a missing file means an empty configuration) and apply
/// environment overrides.
pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Configuration> {
    let mut config = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str::<Configuration>(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "no config file, starting empty");
        Configuration::default()
    };

    if let Some(api) = env(API_ENV) {
        config.api_endpoint = api;
    }
    if let Some(token) = env(TOKEN_ENV) {
        config.access_token = AccessToken::new(token);
    }

    Ok(config)
}
