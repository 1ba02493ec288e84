//! Configuration file parsing for fanlog
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::destination::Threshold;
use crate::error::{Error, Result};
use crate::types::Level;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Console destination section
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(flatten)]
    pub threshold: Threshold,
    /// Colourize the level prefix (default: true)
    #[serde(default = "default_colors")]
    pub colors: bool,
}

fn default_colors() -> bool {
    true
}

/// File destination section; unset fields fall back to the defaults in `constants`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(flatten)]
    pub threshold: Threshold,
    /// Overrides the platform base directory
    pub base_dir: Option<PathBuf>,
    pub folder: Option<String>,
    pub base_name: Option<String>,
    pub size_limit_bytes: Option<i64>,
    pub rotations_kept: Option<u32>,
    pub charset: Option<String>,
}

/// Crash-reporting destination section
#[derive(Debug, Clone, Deserialize)]
pub struct CrashConfig {
    #[serde(flatten)]
    pub threshold: Threshold,
    /// HTTP endpoint reports are POSTed to
    pub endpoint: String,
    /// Sent as a bearer token when present
    pub api_key: Option<String>,
    /// Events at or above this level become reports (default: error)
    pub report_level: Option<Level>,
    /// Number of breadcrumbs kept (default: 100)
    pub breadcrumbs: Option<usize>,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: Option<u64>,
}

impl CrashConfig {
    pub fn report_level(&self) -> Level {
        self.report_level.unwrap_or(Level::Error)
    }

    pub fn breadcrumb_capacity(&self) -> usize {
        self.breadcrumbs.unwrap_or(DEFAULT_BREADCRUMB_CAPACITY)
    }
}

/// Configuration file structure (fanlog.toml/yaml/json)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Prefix every message with the time it was logged
    #[serde(default)]
    pub timestamps: bool,
    pub console: Option<ConsoleConfig>,
    pub file: Option<FileConfig>,
    pub crash: Option<CrashConfig>,
}

impl LoggingConfig {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::config(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: LoggingConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Find and load a config file from a directory
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, path));
            }
        }
        Err(Error::config(format!(
            "No config file found in {}. Expected one of: {:?}",
            dir.display(),
            CONFIG_FILES
        )))
    }
}
