//! Application configuration file.
//!
//! Read from `config.toml` in the platform config directory. Every key is
//! optional and a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "everyso.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the default database location
    pub database_path: Option<PathBuf>,
    /// Default `env_logger` filter; `RUST_LOG` still wins
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "EverySo", "EverySo")
    }

    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Reads the file at `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Loads the user's config, falling back to defaults on any problem.
    /// Runs before the logger exists, so problems are returned for logging.
    pub fn load_or_default() -> (Self, Option<String>) {
        let Some(path) = Self::default_config_path() else {
            return (Self::default(), None);
        };

        match Self::load_from(&path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(format!("{:#}", err))),
        }
    }

    /// Where the SQLite file lives.
    ///
    /// Debug builds keep the database in the working directory.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        if cfg!(debug_assertions) {
            return Ok(PathBuf::from(DATABASE_FILE_NAME));
        }

        match Self::project_dirs() {
            Some(dirs) => {
                let data_dir = dirs.data_dir();
                fs::create_dir_all(data_dir).with_context(|| {
                    format!("failed to create data directory {}", data_dir.display())
                })?;
                Ok(data_dir.join(DATABASE_FILE_NAME))
            }
            None => Ok(PathBuf::from(DATABASE_FILE_NAME)),
        }
    }
}
