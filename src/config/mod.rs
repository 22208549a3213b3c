use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple/";
const DEFAULT_JSON_API_URL: &str = "https://pypi.org/pypi";
const DEFAULT_LISTING_TIMEOUT_SECS: u64 = 10;
const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 3;
const DEFAULT_MAX_WORKERS: usize = 10;
const DEFAULT_COUNT: usize = 10;

/// Largest accepted bound on concurrent metadata lookups
pub const MAX_WORKERS: usize = 256;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Listing page enumerating every published package
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Base of the per-package JSON metadata API
    #[serde(default = "default_json_api_url")]
    pub json_api_url: String,

    /// Timeout for the listing fetch, in seconds
    #[serde(default = "default_listing_timeout_secs")]
    pub listing_timeout_secs: u64,

    /// Timeout for each metadata lookup, in seconds
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Upper bound on metadata lookups in flight at once
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Result count used when `--count` is not given
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_json_api_url() -> String {
    DEFAULT_JSON_API_URL.to_string()
}

fn default_listing_timeout_secs() -> u64 {
    DEFAULT_LISTING_TIMEOUT_SECS
}

fn default_metadata_timeout_secs() -> u64 {
    DEFAULT_METADATA_TIMEOUT_SECS
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load configuration from an explicit YAML file, or use defaults.
    ///
    /// Nothing is read from disk unless a path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let config_path = expand_path(&path.to_string_lossy());
        info!("Loading configuration from: {:?}", config_path);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;
        // serde's #[serde(default)] handles all defaults during deserialization
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {:?}", config_path))?;

        anyhow::ensure!(
            (1..=MAX_WORKERS).contains(&config.max_workers),
            "max_workers must be between 1 and {}",
            MAX_WORKERS
        );
        anyhow::ensure!(config.default_count > 0, "default_count must be at least 1");
        anyhow::ensure!(config.listing_timeout_secs > 0, "listing_timeout_secs must be at least 1");
        anyhow::ensure!(config.metadata_timeout_secs > 0, "metadata_timeout_secs must be at least 1");

        Ok(config)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    /// JSON metadata URL for one package
    pub fn metadata_url(&self, name: &str) -> String {
        format!(
            "{}/{}/json",
            self.json_api_url.trim_end_matches('/'),
            urlencoding::encode(name)
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            json_api_url: default_json_api_url(),
            listing_timeout_secs: DEFAULT_LISTING_TIMEOUT_SECS,
            metadata_timeout_secs: DEFAULT_METADATA_TIMEOUT_SECS,
            max_workers: DEFAULT_MAX_WORKERS,
            default_count: DEFAULT_COUNT,
            user_agent: default_user_agent(),
        }
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
