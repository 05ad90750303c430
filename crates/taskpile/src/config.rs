//! Resolution of where the task collection lives on disk.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

const APP_DIR: &str = "taskpile";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "tasks.json";

/// Environment override for the data file path.
pub const DATA_FILE_ENV: &str = "TASKPILE_DATA_FILE";
/// Environment override for the config file path.
pub const CONFIG_ENV: &str = "TASKPILE_CONFIG";

/// Raw config file contents.
#[derive(Debug, Clone, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    data_file: Option<PathBuf>,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the serialized task collection is stored.
    pub data_file: PathBuf,
}

impl Config {
    /// Resolve the data file path.
    ///
    /// Precedence: `TASKPILE_DATA_FILE` env var, then a `data_file` entry in
    /// the config file (`TASKPILE_CONFIG` or
    /// `~/.config/taskpile/config.toml`), then the platform data directory.
    ///
    /// # Errors
    /// Returns an error when the config file exists but cannot be parsed, or
    /// when no data directory can be resolved at all.
    pub fn load() -> Result<Self> {
        if let Some(path) = env::var_os(DATA_FILE_ENV) {
            return Ok(Self {
                data_file: PathBuf::from(path),
            });
        }

        if let Some(data_file) = Self::from_config_file()? {
            return Ok(Self { data_file });
        }

        let dir = dirs::data_dir().ok_or_else(|| anyhow!("failed to resolve a data directory"))?;
        Ok(Self {
            data_file: dir.join(APP_DIR).join(DATA_FILE),
        })
    }

    fn from_config_file() -> Result<Option<PathBuf>> {
        let path = env::var_os(CONFIG_ENV).map_or_else(
            || dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)),
            |p| Some(PathBuf::from(p)),
        );
        let Some(path) = path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let parsed = Self::parse_file(&path)?;
        Ok(parsed.data_file)
    }

    fn parse_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}
