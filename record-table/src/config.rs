//! Optional JSON config: page size, keybinding overrides and seed records

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use record_table_core::{seed_records, Keybindings, Record, RecordError, RecordStore};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::keymap::{default_keybindings, KeyContext};

const APP_DIR: &str = "record-table";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid records in config: {0}")]
    Records(#[from] RecordError),

    #[error("page_size must be at least 1")]
    PageSize,
}

/// Config file contents; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub page_size: Option<usize>,
    pub keybindings: Option<Keybindings<KeyContext>>,
    pub records: Option<Vec<Record>>,
}

impl AppConfig {
    /// `<config dir>/record-table/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Page size: CLI override, then the file, then the default
    pub fn page_size(&self, cli: Option<usize>) -> Result<usize, ConfigError> {
        match cli.or(self.page_size) {
            Some(0) => Err(ConfigError::PageSize),
            Some(n) => Ok(n),
            None => Ok(record_table_core::table::DEFAULT_PAGE_SIZE),
        }
    }

    /// Defaults with the user's bindings laid over them
    pub fn keybindings(&self) -> Keybindings<KeyContext> {
        match &self.keybindings {
            Some(user) => default_keybindings().merge(user.clone()),
            None => default_keybindings(),
        }
    }

    /// Initial records: the configured list or the built-in seed
    pub fn record_store(&self) -> Result<RecordStore, ConfigError> {
        let records = self.records.clone().unwrap_or_else(seed_records);
        Ok(RecordStore::from_records(records)?)
    }
}
