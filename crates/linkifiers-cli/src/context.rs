// Rust guideline compliant 2026-02-06

//! Shared state for a single `edit-linkifiers` invocation.
//!
//! Loads the configuration, resolves the target realm and opens the
//! registry over the JSONL store in the data directory.

use anyhow::{Context, Result};
use linkifiers_core::{Config, ConfigRealms, JsonlStore, Realm, RealmResolver, Registry};
use std::path::{Path, PathBuf};

/// Data directory used when neither `--data-dir` nor `LINKIFIERS_DATA_DIR` is set.
pub const DEFAULT_DATA_DIR: &str = ".linkifiers";

/// Everything a command needs to act on one realm.
pub struct AdminContext {
    /// Loaded configuration.
    pub config: Config,
    /// The realm being administered.
    pub realm: Realm,
    /// Registry backed by the data directory.
    pub registry: Registry<JsonlStore>,
}

impl AdminContext {
    /// Opens the context for `realm_selector`.
    ///
    /// The configuration is read from `config_path` when given, otherwise
    /// from `linkifiers.toml` in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file is invalid
    /// - No configured realm matches the selector
    /// - The data directory path is invalid
    pub fn open(data_dir: &Path, config_path: Option<&Path>, realm_selector: &str) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::load(data_dir).with_context(|| {
                format!("Failed to load config from {}", data_dir.display())
            })?,
        };

        let realm = ConfigRealms::new(config.realms.clone()).resolve(realm_selector)?;
        log::debug!("Resolved realm '{}' to id {}", realm_selector, realm.id);

        let store = JsonlStore::new(PathBuf::from(data_dir))?;
        let registry = Registry::with_config(store, &config);

        Ok(Self {
            config,
            realm,
            registry,
        })
    }
}
