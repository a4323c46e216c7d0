//! Single-membership repair pass run once per load.
//!
//! Groups are scanned in document order; the first group to list a path keeps
//! it and every later occurrence (including repeats inside the same group) is
//! dropped. Running the pass on its own output removes nothing.

use crate::store::document::GroupDocument;
use std::collections::HashMap;

/// A member dropped by the repair pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRemoval {
    pub group: String,
    pub member: String,
    /// Group that keeps the member.
    pub kept_by: String,
}

/// Outcome of a repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub removals: Vec<RepairRemoval>,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        !self.removals.is_empty()
    }
}

/// Enforce "a path belongs to at most one group" on `document`, first group wins.
pub fn repair_duplicates(document: &mut GroupDocument) -> RepairReport {
    let mut claimed: HashMap<String, String> = HashMap::new();
    let mut report = RepairReport::default();

    for group in document.iter_mut() {
        let name = group.name.clone();
        group.members.retain(|member| match claimed.get(member) {
            Some(owner) => {
                report.removals.push(RepairRemoval {
                    group: name.clone(),
                    member: member.clone(),
                    kept_by: owner.clone(),
                });
                false
            }
            None => {
                claimed.insert(member.clone(), name.clone());
                true
            }
        });
    }

    report
}
