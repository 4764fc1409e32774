//! Configuration management for devlog.
//!
//! Configuration is loaded with figment from defaults, an optional TOML
//! file and `DEVLOG_`-prefixed environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";

const DATA_DIR_NAME: &str = "devlog";

const LOG_FILE_NAME: &str = "devlog.log";

/// Application configuration.
///
/// Sources in order of precedence, highest first:
/// 1. Environment variables (`DEVLOG_STORAGE__DATA_DIR`, `DEVLOG_EXPORT__DIR`, ...)
/// 2. TOML config file at `~/.config/devlog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the journal snapshot.
    /// Defaults to `~/.local/share/devlog`
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where `dev-journal.txt` is written. Defaults to the working directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Defaults to `devlog.log` inside the data directory.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if the sources cannot be parsed or the result fails
    /// validation.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("DEVLOG_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies a command-line data directory and re-validates.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = data_dir {
            self.storage.data_dir = Some(dir);
        }
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.export.dir {
            if dir.is_file() {
                return Err(Error::ConfigValidation {
                    message: format!("export dir {} is a file", dir.display()),
                });
            }
        }
        if let Some(dir) = &self.storage.data_dir {
            if dir.is_file() {
                return Err(Error::ConfigValidation {
                    message: format!("data dir {} is a file", dir.display()),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| self.data_dir().join(LOG_FILE_NAME))
    }
}
