//! Configuration management for the query builder
//!
//! Default config location: ~/.pythia/query.toml

use crate::error::{Error, Result};
use crate::query::QueryScope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Scope new builders start in
    #[serde(default)]
    pub scope: QueryScope,
    /// Corpus ids for the `@@` prologue (empty = search everything)
    #[serde(default)]
    pub corpora: Vec<String>,
    /// Insert AND between two adjacent clauses
    #[serde(default = "default_true")]
    pub implicit_and: bool,
}

fn default_true() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            scope: QueryScope::default(),
            corpora: Vec::new(),
            implicit_and: default_true(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Default config path, `None` when the home directory is unknown
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pythia").join("query.toml"))
}

impl Config {
    /// Load config from the default location, falling back to defaults
    /// when the file does not exist
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load config from a file that must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file path, or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            let config = Config::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(id) = self
            .query
            .corpora
            .iter()
            .find(|id| id.trim().is_empty() || id.contains(char::is_whitespace))
        {
            return Err(Error::Config(format!("Invalid corpus id: '{}'", id)));
        }
        Ok(())
    }
}
