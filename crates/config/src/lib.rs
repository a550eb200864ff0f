//! `stockroom-config` — layered startup configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. a TOML file (`stockroom.toml` unless another path is given), if present
//! 3. `STOCKROOM_`-prefixed environment variables, with `__` separating
//!    nested keys (`STOCKROOM_LOG__LEVEL=debug`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "stockroom.toml";
pub const ENV_PREFIX: &str = "STOCKROOM_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockroomConfig {
    /// Load the built-in demo data when no seed file is configured.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    /// JSON seed file; replaces the demo data when set.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
    /// Number of orders shown on the dashboard.
    #[serde(default = "default_recent_orders_limit")]
    pub recent_orders_limit: usize,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_recent_orders_limit() -> usize {
    5
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
            seed_file: None,
            recent_orders_limit: default_recent_orders_limit(),
            log: LogConfig::default(),
        }
    }
}

impl StockroomConfig {
    /// Load from `stockroom.toml` in the working directory and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the given TOML file and the environment. A missing file is
    /// not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    /// The provider stack, exposed so callers can merge extra sources.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(StockroomConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }
}
