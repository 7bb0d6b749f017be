// Rust guideline compliant 2026-02-06

//! Configuration management for linkifiers.

use crate::models::Realm;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "linkifiers.toml";

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Configuration for linkifier administration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Maximum accepted pattern length in characters.
    #[serde(default = "default_max_pattern_length")]
    pub max_pattern_length: usize,

    /// Known realms.
    #[serde(default)]
    pub realms: Vec<Realm>,
}

/// Default maximum pattern length.
fn default_max_pattern_length() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            max_pattern_length: default_max_pattern_length(),
            realms: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `linkifiers.toml` in `data_dir` and
    /// environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<data_dir>/linkifiers.toml`
    /// 3. Environment variables with `LINKIFIERS_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_file(&data_dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from an explicit file path; a missing file yields
    /// defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            config = toml::from_str(&content).map_err(|e| {
                Error::Config(format!(
                    "Invalid config file {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            log::debug!("Loaded configuration from {}", config_path.display());
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `LINKIFIERS_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `LINKIFIERS_MAX_PATTERN_LENGTH` - Maximum pattern length
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LINKIFIERS_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::Config(
                        "LINKIFIERS_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("LINKIFIERS_MAX_PATTERN_LENGTH") {
            self.max_pattern_length = val.parse().map_err(|_| {
                Error::Config(
                    "LINKIFIERS_MAX_PATTERN_LENGTH must be a positive number".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - max_pattern_length is zero
    /// - a realm has an empty or numeric string_id
    /// - realm ids or string_ids repeat
    fn validate(&self) -> Result<()> {
        if self.max_pattern_length == 0 {
            return Err(Error::Config(
                "max_pattern_length must be greater than 0".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut string_ids = HashSet::new();
        for realm in &self.realms {
            if realm.string_id.trim().is_empty() {
                return Err(Error::Config(format!(
                    "realm {} has an empty string_id",
                    realm.id
                )));
            }
            if realm.string_id.parse::<u64>().is_ok() {
                return Err(Error::Config(format!(
                    "realm string_id '{}' cannot be numeric",
                    realm.string_id
                )));
            }
            if !ids.insert(realm.id) {
                return Err(Error::Config(format!("duplicate realm id {}", realm.id)));
            }
            if !string_ids.insert(realm.string_id.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate realm string_id '{}'",
                    realm.string_id
                )));
            }
        }

        Ok(())
    }

    /// Saves the configuration to `<data_dir>/linkifiers.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::create_dir_all(data_dir)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
