//! In-memory groups document and its JSON codec.
//!
//! The persisted form is a single JSON object: group name -> array of absolute
//! path strings. Key order and member order are both significant and survive a
//! save/load cycle.

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::path::Path;

/// A named group and its members in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Remove the first occurrence of `member`. Returns whether it was present.
    pub fn remove(&mut self, member: &str) -> bool {
        match self.members.iter().position(|m| m == member) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Ordered mapping of group name to group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDocument {
    groups: Vec<Group>,
}

impl GroupDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Append a group. Returns false if the name is already taken.
    pub fn insert(&mut self, group: Group) -> bool {
        if self.contains(&group.name) {
            return false;
        }
        self.groups.push(group);
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Group> {
        let index = self.groups.iter().position(|g| g.name == name)?;
        Some(self.groups.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.iter_mut()
    }

    /// Name of the group currently holding `member`, if any.
    pub fn owner_of(&self, member: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.contains(member))
            .map(|g| g.name.as_str())
    }

    /// Parse the persisted JSON form. `path` is only used for error reporting.
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, StoreError> {
        let corrupt = |reason: String| StoreError::StorageCorrupt {
            path: path.to_path_buf(),
            reason,
        };

        let value: Value = serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(corrupt("top-level value is not a JSON object".to_string()));
        };

        let mut document = GroupDocument::new();
        for (name, members) in map {
            let Value::Array(items) = members else {
                return Err(corrupt(format!("group '{}' is not an array", name)));
            };
            let mut group = Group::new(name);
            for item in items {
                match item {
                    Value::String(member) => group.members.push(member),
                    other => {
                        return Err(corrupt(format!(
                            "group '{}' contains a non-string entry: {}",
                            group.name, other
                        )))
                    }
                }
            }
            document.groups.push(group);
        }
        Ok(document)
    }

    /// Serialize to the persisted JSON form (two-space indent).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut map = Map::with_capacity(self.groups.len());
        for group in &self.groups {
            let members = group
                .members
                .iter()
                .cloned()
                .map(Value::String)
                .collect::<Vec<_>>();
            map.insert(group.name.clone(), Value::Array(members));
        }
        serde_json::to_string_pretty(&Value::Object(map))
    }
}
