//! Global config file source: $XDG_CONFIG_HOME/groupie/config.toml or ~/.config/groupie/config.toml

use crate::config::paths;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    paths::config_home().map(|dir| dir.join(paths::APP_NAME).join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) if path.is_file() => {
            builder = builder.add_source(File::from(path).required(false));
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No global configuration file");
        }
        None => {
            debug!("Home directory unknown; skipping global configuration file");
        }
    }
    Ok(builder)
}
