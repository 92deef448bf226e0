//! TOML configuration for the `timebro` binary.
//!
//! ```toml
//! store = "/home/me/.timebro.json"
//! use_24_hour = true
//!
//! [search]
//! granularity_minutes = 15
//! max_results = 5
//!
//! [search.window]
//! start = 9
//! end = 18
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::SearchOptions;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "TIMEBRO_CONFIG";
/// Environment variable naming the JSON store when neither `--store` nor the
/// config file sets one.
pub const STORE_ENV: &str = "TIMEBRO_STORE";

const DEFAULT_STORE_FILE: &str = ".timebro.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Search defaults.
    pub search: SearchOptions,
    /// Where usage counts and preferences are kept.
    pub store: Option<PathBuf>,
    /// Clock format override. When unset the stored preference applies.
    pub use_24_hour: Option<bool>,
}

impl Config {
    /// Load from `path`, else from `$TIMEBRO_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let config = Self::parse(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The store path: explicit flag, then config, then `$TIMEBRO_STORE`,
    /// then `~/.timebro.json`.
    pub fn store_path(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(p) = flag {
            return p.to_path_buf();
        }
        if let Some(p) = &self.store {
            return p.clone();
        }
        if let Some(p) = std::env::var_os(STORE_ENV) {
            return PathBuf::from(p);
        }
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(DEFAULT_STORE_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}
