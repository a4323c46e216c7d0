//! Configuration System
//!
//! Layered configuration for the store location, display preferences and
//! logging. See [`merge::merge_policy`] for source precedence.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::store::StoreOptions;
use config::File;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
pub mod paths;
mod sources;

pub use sources::environment::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupieConfig {
    /// Groups file settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listing display settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Groups file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Groups file location (default: ~/.file_groups.json)
    #[serde(default)]
    pub groups_file: Option<PathBuf>,

    /// Hold an exclusive lock on the groups file for each command
    #[serde(default = "default_true")]
    pub lock: bool,
}

/// Listing display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Color file names by type
    #[serde(default = "default_true")]
    pub color: bool,

    /// Show dot files in `ls` without `--all`
    #[serde(default)]
    pub show_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            groups_file: None,
            lock: default_true(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            show_hidden: false,
        }
    }
}

impl StorageConfig {
    /// The configured groups file, or the per-user default.
    pub fn resolve_groups_file(&self) -> Result<PathBuf, ApiError> {
        match &self.groups_file {
            Some(path) if path.as_os_str().is_empty() => Err(ApiError::ConfigError(
                "storage.groups_file cannot be empty".to_string(),
            )),
            Some(path) => Ok(path.clone()),
            None => paths::default_groups_file().ok_or_else(|| {
                ApiError::ConfigError(
                    "Cannot determine home directory for the default groups file; \
                     set storage.groups_file or pass --store"
                        .to_string(),
                )
            }),
        }
    }

    /// Store options for opening the group store.
    pub fn store_options(&self) -> Result<StoreOptions, ApiError> {
        let options = StoreOptions::new(self.resolve_groups_file()?);
        Ok(if self.lock {
            options
        } else {
            options.without_lock()
        })
    }
}

/// Loads [`GroupieConfig`] from defaults, files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file, then `GROUPIE_*` environment variables.
    pub fn load() -> Result<GroupieConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::environment::add_to_builder(builder)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Defaults, then `path` (must exist), then `GROUPIE_*` environment variables.
    pub fn load_from_file(path: &Path) -> Result<GroupieConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = sources::environment::add_to_builder(builder)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Location of the global config file, if the home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
