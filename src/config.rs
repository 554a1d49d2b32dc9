use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Entries processed between cancellation checks inside one directory
    pub cancel_check_interval: usize,
    /// Skip /proc, /sys, /dev and /run below the scan root
    pub skip_virtual_fs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Entries kept before the rest are folded into "(Other)"
    pub max_items: usize,
    /// Progress polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            cancel_check_interval: 256,
            skip_virtual_fs: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_items: 60,
            poll_interval_ms: 200,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location if it exists.
    ///
    /// A missing default file yields the built-in defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/spacemap/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spacemap").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.cancel_check_interval == 0 {
            return Err(ConfigError::Invalid(
                "scanner.cancel_check_interval must be at least 1".into(),
            ));
        }

        if self.report.max_items == 0 {
            return Err(ConfigError::Invalid(
                "report.max_items must be at least 1".into(),
            ));
        }

        if !(10..=10_000).contains(&self.report.poll_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "report.poll_interval_ms must be between 10 and 10000, got {}",
                self.report.poll_interval_ms
            )));
        }

        Ok(())
    }
}
