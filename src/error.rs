//! Error types for the Groupie file grouping system.

use std::path::PathBuf;
use thiserror::Error;

/// Group store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Group '{0}' already exists")]
    GroupAlreadyExists(String),

    #[error("Group '{0}' does not exist")]
    GroupNotFound(String),

    #[error("Groups file {path:?} is corrupt: {reason}")]
    StorageCorrupt { path: PathBuf, reason: String },

    #[error("Failed to read groups file {path:?}: {source}")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write groups file {path:?}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock groups file {path:?}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Errors surfaced by the CLI layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Group '{0}' not found")]
    NoSuchGroup(String),

    #[error("File not found in group '{group}'")]
    FileNotInGroup { group: String, path: PathBuf },

    #[error("Path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Failed to render output: {0}")]
    Render(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// True for errors caused by the user's request rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::Store(StoreError::GroupAlreadyExists(_))
                | ApiError::Store(StoreError::GroupNotFound(_))
                | ApiError::Store(StoreError::InvalidPath(_))
                | ApiError::NoSuchGroup(_)
                | ApiError::FileNotInGroup { .. }
                | ApiError::PathNotFound(_)
        )
    }
}
