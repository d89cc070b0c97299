use crate::errors::ConfigError;
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sqlite: SqliteConfig,
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqliteConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub video_id: String,
    /// Override for tests and proxies; the real endpoint by default.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

pub fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var("APP_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("secrets.toml")
}

/// Loads the configuration file. A missing or malformed file is fatal; the
/// server refuses to start without a store path, API key and video id.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
