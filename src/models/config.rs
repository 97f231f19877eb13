//! Per-user configuration stored in ~/.agentkit/config.json
//!
//! Loaded once at process start and passed down explicitly; only the
//! `config` command writes it back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How an artifact is placed into a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMethod {
    #[default]
    Symlink,
    Copy,
}

impl fmt::Display for LinkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkMethod::Symlink => f.write_str("symlink"),
            LinkMethod::Copy => f.write_str("copy"),
        }
    }
}

impl FromStr for LinkMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symlink" => Ok(LinkMethod::Symlink),
            "copy" => Ok(LinkMethod::Copy),
            other => Err(ConfigError::InvalidMethod(other.to_string())),
        }
    }
}

/// Errors that can occur when reading or writing the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid link method '{0}' (expected 'symlink' or 'copy')")]
    InvalidMethod(String),

    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    Parse(PathBuf, serde_json::Error),

    #[error("Failed to write config file '{}': {}", .0.display(), .1)]
    Write(PathBuf, std::io::Error),

    #[error("Could not find home directory")]
    NoHome,
}

/// Persisted user preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_method: Option<LinkMethod>,
}

impl Config {
    /// Get the config file path (~/.agentkit/config.json)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(".agentkit").join("config.json"))
    }

    /// A missing file is an empty config
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write(path.to_path_buf(), e))?;
        }
        let mut content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        content.push('\n');
        fs::write(path, content).map_err(|e| ConfigError::Write(path.to_path_buf(), e))
    }

    /// Overlay the fields set in `update`
    pub fn merge(&mut self, update: Config) {
        if update.default_target.is_some() {
            self.default_target = update.default_target;
        }
        if update.link_method.is_some() {
            self.link_method = update.link_method;
        }
    }

    pub fn link_method_or_default(&self) -> LinkMethod {
        self.link_method.unwrap_or_default()
    }
}
