//! Per-user filesystem locations: home, config home, state directory.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Application name used for config and state directories.
pub const APP_NAME: &str = "groupie";

/// File name of the default groups file, placed directly under the home directory.
pub const DEFAULT_GROUPS_FILE_NAME: &str = ".file_groups.json";

/// The current user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// `$XDG_CONFIG_HOME`, or `~/.config` when unset or empty.
pub fn config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home_dir().map(|home| home.join(".config")),
    }
}

/// Default groups file: `~/.file_groups.json`.
pub fn default_groups_file() -> Option<PathBuf> {
    home_dir().map(|home| home.join(DEFAULT_GROUPS_FILE_NAME))
}

/// Directory for logs and other per-user state.
///
/// Uses the platform state directory where one exists (`$XDG_STATE_HOME/groupie`
/// on Linux) and the local data directory elsewhere.
pub fn state_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| {
        dirs.state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .to_path_buf()
    })
}
