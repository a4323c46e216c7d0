//! Group Store
//!
//! Owns the mapping from group name to an ordered list of absolute member
//! paths, backed by a single JSON document. Every operation runs inside one
//! load -> mutate -> save cycle: [`GroupStore::open`] loads (and repairs) the
//! document, each mutating call rewrites the whole file, and dropping the store
//! releases the file lock.
//!
//! A resolved path is a member of at most one group. `add_files` maintains this
//! by moving the path out of whichever group held it; `open` restores it for
//! documents edited by hand.

pub mod document;
pub mod lock;
pub mod path;
pub mod persistence;
pub mod repair;

pub use document::{Group, GroupDocument};
pub use lock::StoreLock;
pub use path::{resolve_member, resolve_path};
pub use repair::{repair_duplicates, RepairRemoval, RepairReport};

use crate::error::StoreError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the store lives and how it is opened.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Groups file location.
    pub groups_file: PathBuf,
    /// Hold an exclusive lock for the lifetime of the opened store.
    pub lock: bool,
}

impl StoreOptions {
    pub fn new(groups_file: impl Into<PathBuf>) -> Self {
        Self {
            groups_file: groups_file.into(),
            lock: true,
        }
    }

    pub fn without_lock(mut self) -> Self {
        self.lock = false;
        self
    }
}

/// Counts reported by [`GroupStore::add_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub added: usize,
    pub already_present: usize,
}

/// A member path and whether it was missing from disk when checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStatus {
    pub path: String,
    pub missing: bool,
}

/// One group as returned by [`GroupStore::list_groups`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupListing {
    pub name: String,
    pub members: Vec<MemberStatus>,
}

/// Members dropped from one group by [`GroupStore::clean_groups`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedGroup {
    pub name: String,
    pub removed: Vec<String>,
}

/// Group membership store for one invocation.
#[derive(Debug)]
pub struct GroupStore {
    path: PathBuf,
    document: GroupDocument,
    repair: RepairReport,
    _lock: Option<StoreLock>,
}

impl GroupStore {
    /// Open the store: lock (if enabled), load, repair, and persist any repair.
    ///
    /// A missing groups file yields an empty store without creating the file.
    pub fn open(options: &StoreOptions) -> Result<Self, StoreError> {
        let lock = if options.lock {
            Some(StoreLock::acquire(&options.groups_file)?)
        } else {
            None
        };

        let path = options.groups_file.clone();
        let mut document = persistence::read_document(&path)?.unwrap_or_default();

        let repair = repair_duplicates(&mut document);
        if repair.changed() {
            for removal in &repair.removals {
                warn!(
                    group = %removal.group,
                    member = %removal.member,
                    kept_by = %removal.kept_by,
                    "Dropped duplicate group membership"
                );
            }
            persistence::write_document(&path, &document)?;
        }

        debug!(path = %path.display(), groups = document.len(), "Opened group store");
        Ok(Self {
            path,
            document,
            repair,
            _lock: lock,
        })
    }

    /// Groups file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory document.
    pub fn groups(&self) -> &GroupDocument {
        &self.document
    }

    /// What the repair pass changed while opening.
    pub fn repair_report(&self) -> &RepairReport {
        &self.repair
    }

    fn save(&self) -> Result<(), StoreError> {
        persistence::write_document(&self.path, &self.document)
    }

    /// Create an empty group. Returns false (and writes nothing) if the name exists.
    pub fn create_group(&mut self, name: &str) -> Result<bool, StoreError> {
        if !self.document.insert(Group::new(name)) {
            return Ok(false);
        }
        self.save()?;
        info!(group = name, "Created group");
        Ok(true)
    }

    /// Add paths to `group_name`, moving each out of any other group holding it.
    ///
    /// Paths are resolved before any change is made, so an unresolvable path
    /// leaves the store untouched. The file is written once, and only if
    /// membership actually changed.
    pub fn add_files<P: AsRef<Path>>(
        &mut self,
        group_name: &str,
        paths: &[P],
    ) -> Result<AddOutcome, StoreError> {
        if !self.document.contains(group_name) {
            return Err(StoreError::GroupNotFound(group_name.to_string()));
        }

        let members = paths
            .iter()
            .map(|p| resolve_member(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut outcome = AddOutcome::default();
        let mut changed = false;

        for member in members {
            let previous_owner = self
                .document
                .owner_of(&member)
                .filter(|owner| *owner != group_name)
                .map(str::to_string);
            if let Some(owner) = previous_owner {
                if let Some(other) = self.document.get_mut(&owner) {
                    other.remove(&member);
                }
                info!(
                    member = %member,
                    from = %owner,
                    to = group_name,
                    "Moved file between groups"
                );
                changed = true;
            }

            let Some(target) = self.document.get_mut(group_name) else {
                return Err(StoreError::GroupNotFound(group_name.to_string()));
            };
            if target.contains(&member) {
                outcome.already_present += 1;
            } else {
                target.members.push(member);
                outcome.added += 1;
                changed = true;
            }
        }

        if changed {
            self.save()?;
        }
        info!(
            group = group_name,
            added = outcome.added,
            already_present = outcome.already_present,
            "Added files to group"
        );
        Ok(outcome)
    }

    /// List every group with each member's missing flag, in member order.
    ///
    /// With `clean`, missing members are also dropped from the store and the
    /// file is rewritten once if anything was dropped. The returned listing
    /// still includes the dropped members, flagged missing.
    pub fn list_groups(&mut self, clean: bool) -> Result<Vec<GroupListing>, StoreError> {
        let mut listing = Vec::with_capacity(self.document.len());
        let mut removed = 0usize;

        for group in self.document.iter_mut() {
            let members: Vec<MemberStatus> = group
                .members
                .iter()
                .map(|member| MemberStatus {
                    path: member.clone(),
                    missing: !Path::new(member).exists(),
                })
                .collect();

            if clean {
                let before = group.members.len();
                group.members = members
                    .iter()
                    .filter(|m| !m.missing)
                    .map(|m| m.path.clone())
                    .collect();
                removed += before - group.members.len();
            }

            listing.push(GroupListing {
                name: group.name.clone(),
                members,
            });
        }

        if clean && removed > 0 {
            self.save()?;
            info!(removed, "Cleaned missing files while listing");
        }
        Ok(listing)
    }

    /// Drop every member that no longer exists on disk.
    ///
    /// Returns the dropped paths per group, omitting groups that lost nothing.
    /// Writes the file once if anything was dropped, otherwise not at all.
    pub fn clean_groups(&mut self) -> Result<Vec<CleanedGroup>, StoreError> {
        let mut cleaned = Vec::new();

        for group in self.document.iter_mut() {
            let (kept, missing): (Vec<String>, Vec<String>) = group
                .members
                .drain(..)
                .partition(|member| Path::new(member).exists());
            group.members = kept;
            if !missing.is_empty() {
                cleaned.push(CleanedGroup {
                    name: group.name.clone(),
                    removed: missing,
                });
            }
        }

        if !cleaned.is_empty() {
            self.save()?;
            let total: usize = cleaned.iter().map(|c| c.removed.len()).sum();
            info!(removed = total, groups = cleaned.len(), "Cleaned missing files");
        }
        Ok(cleaned)
    }

    /// Remove a group and its memberships. Returns false if it does not exist.
    pub fn remove_group(&mut self, name: &str) -> Result<bool, StoreError> {
        if self.document.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        info!(group = name, "Removed group");
        Ok(true)
    }

    /// Remove one path from a group. Returns false if it is not a member.
    pub fn remove_file(&mut self, group_name: &str, path: &Path) -> Result<bool, StoreError> {
        if !self.document.contains(group_name) {
            return Err(StoreError::GroupNotFound(group_name.to_string()));
        }
        let member = resolve_member(path)?;

        let removed = self
            .document
            .get_mut(group_name)
            .map(|group| group.remove(&member))
            .unwrap_or(false);
        if !removed {
            return Ok(false);
        }
        self.save()?;
        info!(group = group_name, member = %member, "Removed file from group");
        Ok(true)
    }
}
