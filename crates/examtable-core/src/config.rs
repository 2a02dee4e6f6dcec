//! File configuration: optional defaults that sit outside the persisted
//! timetable state (remote document URL, default student name).

use std::fs;
use std::path::PathBuf;

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "examtable";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Result returned by [`load_config`], capturing the source and any
/// non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were used.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    /// URL of the static subject document used as the remote fallback tier.
    #[serde(default)]
    pub data_url: Option<String>,
    /// Default student name for preview/export titles.
    #[serde(default)]
    pub student_name: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            data_url: None,
            student_name: None,
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Directory holding `config.toml` and the log files.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Loads the configuration, degrading to defaults with a warning when the
/// file is missing or corrupt.
pub fn load_config() -> ConfigLoadResult {
    let path = config_path();
    let mut warnings = Vec::new();

    match fs::read_to_string(&path) {
        Ok(text) => match toml::from_str::<FileConfig>(&text) {
            Ok(config) => ConfigLoadResult {
                config,
                warnings,
                source: ConfigSource::File,
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to parse {}: {err}; using defaults",
                    path.display()
                ));
                ConfigLoadResult {
                    config: FileConfig::default(),
                    warnings,
                    source: ConfigSource::Default,
                }
            }
        },
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warnings.push(format!(
                    "Failed to read {}: {err}; using defaults",
                    path.display()
                ));
            }
            ConfigLoadResult {
                config: FileConfig::default(),
                warnings,
                source: ConfigSource::Default,
            }
        }
    }
}

pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(config)?;
    fs::write(&path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_current_schema_version() {
        let config = FileConfig::default();
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(config.data_url.is_none());
        assert!(config.student_name.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str("data_url = \"https://example.com/data.json\"")
            .expect("partial config should parse");
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(
            config.data_url.as_deref(),
            Some("https://example.com/data.json")
        );
    }
}
