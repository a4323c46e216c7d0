//! Member path resolution

use crate::error::StoreError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolve a path to the absolute, canonical form stored as a group member.
///
/// This function:
/// 1. Makes the path absolute against the current directory
/// 2. Canonicalizes it (resolves symlinks, `..`, `.`)
/// 3. For paths that no longer exist, canonicalizes the deepest existing
///    ancestor and appends the remaining components, folding `.` and `..`
///    and following symlinks whose targets are gone
///
/// The result never depends on the path existing, so a deleted member can
/// still be resolved to the string it was stored under.
pub fn resolve_path(path: &Path) -> Result<PathBuf, StoreError> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidPath("empty path".to_string()));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| {
            StoreError::InvalidPath(format!("Failed to read current directory: {}", e))
        })?;
        cwd.join(path)
    };

    resolve_absolute(&absolute, MAX_SYMLINK_HOPS)
}

/// Symlinks followed through missing tails before giving up, as `realpath` does.
const MAX_SYMLINK_HOPS: usize = 40;

fn resolve_absolute(absolute: &Path, hops: usize) -> Result<PathBuf, StoreError> {
    if let Ok(canonical) = dunce::canonicalize(absolute) {
        return Ok(canonical);
    }

    // Walk up until an ancestor resolves, remembering the unresolved tail.
    let mut tail: Vec<Component> = Vec::new();
    let mut cursor = absolute;
    let base = loop {
        match cursor.parent() {
            Some(parent) => {
                if let Some(last) = cursor.components().next_back() {
                    tail.push(last);
                }
                if let Ok(canonical) = dunce::canonicalize(parent) {
                    break canonical;
                }
                cursor = parent;
            }
            None => break cursor.to_path_buf(),
        }
    };

    let mut resolved = base;
    for component in tail.into_iter().rev() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => {
                resolved.push(other.as_os_str());
                let is_link = fs::symlink_metadata(&resolved)
                    .map(|meta| meta.file_type().is_symlink())
                    .unwrap_or(false);
                if is_link {
                    resolved = follow_dangling_link(&resolved, hops)?;
                }
            }
        }
    }

    Ok(resolved)
}

/// Resolve a symlink whose target does not exist (or sits under a missing directory).
fn follow_dangling_link(link: &Path, hops: usize) -> Result<PathBuf, StoreError> {
    if hops == 0 {
        return Err(StoreError::InvalidPath(format!(
            "too many levels of symbolic links: {}",
            link.display()
        )));
    }
    let target = fs::read_link(link).map_err(|e| {
        StoreError::InvalidPath(format!("Failed to read link {}: {}", link.display(), e))
    })?;
    let target = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target,
    };
    resolve_absolute(&target, hops - 1)
}

/// Resolve a path and render it as the string key stored in the groups file.
pub fn resolve_member(path: &Path) -> Result<String, StoreError> {
    let resolved = resolve_path(path)?;
    resolved
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidPath(format!("{:?} is not valid UTF-8", resolved)))
}
