//! Advisory lock held across one load -> mutate -> save cycle.
//!
//! The lock lives on a sibling `<groups file>.lock` so the groups file itself
//! can still be replaced by rename while the lock is held. Released on drop.

use crate::error::StoreError;
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// RAII exclusive lock on a groups file.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Lock file path for a groups file.
    pub fn lock_path_for(groups_file: &Path) -> PathBuf {
        let mut name = groups_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        groups_file.with_file_name(name)
    }

    /// Acquire an exclusive lock for `groups_file`, blocking until available.
    pub fn acquire(groups_file: &Path) -> Result<Self, StoreError> {
        let path = Self::lock_path_for(groups_file);
        let lock_err = |source: std::io::Error| StoreError::Lock {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(lock_err)?;
            }
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;

        debug!(lock = %path.display(), "Acquired groups file lock");
        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
