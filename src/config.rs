//! Configuration loading and management
//!
//! Handles parsing of `tareas.toml` configuration files. The file lives in
//! the platform config directory by default and can be pointed elsewhere
//! with `--config`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::task::{Priority, Status};

/// Name of the data file inside the data directory
pub const DATA_FILE: &str = "tasks.json";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "tareas.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the data file (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Defaults applied when `add` omits a flag
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default field values for new tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_status() -> String {
    "todo".to_string()
}

fn default_priority() -> String {
    "normal".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            status: default_status(),
            priority: default_priority(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from its default location, or return defaults
    /// when no file exists or the file cannot be used.
    pub fn load_default() -> Self {
        match default_config_file() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Self::default(),
        }
    }

    // Forgiving variant of `load`: a broken file is logged and ignored
    // rather than failing the command.
    fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unusable config file");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.default_status()?;
        self.default_priority()?;
        Ok(())
    }

    /// Default status for new tasks, parsed and validated
    pub fn default_status(&self) -> Result<Status> {
        self.defaults
            .status
            .parse()
            .map_err(|_| Error::InvalidConfig(format!(
                "defaults.status '{}' is not a valid status",
                self.defaults.status
            )))
    }

    /// Default priority for new tasks, parsed and validated
    pub fn default_priority(&self) -> Result<Priority> {
        self.defaults
            .priority
            .parse()
            .map_err(|_| Error::InvalidConfig(format!(
                "defaults.priority '{}' is not a valid priority",
                self.defaults.priority
            )))
    }
}

/// Resolve the data file path: CLI override first, then the configured
/// `data_dir`, then the platform data directory, then the working directory.
pub fn resolve_data_file(cli_override: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(path) = cli_override {
        return path.to_path_buf();
    }
    if let Some(dir) = &config.data_dir {
        return dir.join(DATA_FILE);
    }
    match ProjectDirs::from("", "", "tareas") {
        Some(dirs) => dirs.data_dir().join(DATA_FILE),
        None => PathBuf::from(DATA_FILE),
    }
}

fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tareas").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
