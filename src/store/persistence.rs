//! Persistence layer for the groups file
//!
//! Reads are whole-document; writes replace the whole document through a
//! sibling temp file and a rename so a failed save never leaves a truncated
//! file behind.

use crate::error::StoreError;
use crate::store::document::GroupDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the groups document at `path`.
///
/// Returns `Ok(None)` when the file does not exist. A file that exists but does
/// not parse is an error, never an empty document.
pub fn read_document(path: &Path) -> Result<Option<GroupDocument>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(StoreError::StorageCorrupt {
                path: path.to_path_buf(),
                reason: format!("not valid UTF-8: {}", e),
            })
        }
        Err(source) => {
            return Err(StoreError::StorageRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let document = GroupDocument::from_json(&raw, path)?;
    debug!(path = %path.display(), groups = document.len(), "Loaded groups file");
    Ok(Some(document))
}

/// Atomically replace the groups document at `path`.
pub fn write_document(path: &Path, document: &GroupDocument) -> Result<(), StoreError> {
    let write_err = |source: std::io::Error| StoreError::StorageWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let serialized = document
        .to_json()
        .map_err(|e| write_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;

    // Write to temporary file (atomic write)
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, serialized.as_bytes()).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_err(e)
    })?;

    // Atomically rename temp file to final location
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_err(e)
    })?;

    debug!(path = %path.display(), groups = document.len(), "Saved groups file");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
