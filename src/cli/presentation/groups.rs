//! Group command formatters: add summary, ls (text/json), clean preview and summary.

use crate::cli::presentation::grid::layout_grid;
use crate::cli::presentation::style::{format_file_name, missing_legend};
use crate::error::ApiError;
use crate::store::{AddOutcome, CleanedGroup, GroupListing, MemberStatus};
use std::path::{Path, PathBuf};

/// Everything `gr ls` prints in text mode.
#[derive(Debug, Clone)]
pub struct ListingView {
    /// Current-directory entries that belong to no group; `None` with `--no-files`.
    pub loose_entries: Option<Vec<PathBuf>>,
    /// Groups with at least one existing file in the current directory,
    /// each holding its current-directory files and all of its missing files.
    pub groups: Vec<GroupListing>,
    /// Members dropped by `--clean`.
    pub removed: usize,
    pub color: bool,
    pub width: usize,
}

pub fn format_add_result(group: &str, outcome: &AddOutcome) -> String {
    let mut lines = Vec::new();
    if outcome.added > 0 {
        lines.push(format!(
            "Added {} file(s) to group '{}'",
            outcome.added, group
        ));
    }
    if outcome.already_present > 0 {
        lines.push(format!(
            "{} file(s) were already in group '{}'",
            outcome.already_present, group
        ));
    }
    if lines.is_empty() {
        lines.push("No files were added".to_string());
    }
    lines.join("\n")
}

fn sorted_names<'a, I>(members: I, color: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a MemberStatus>,
{
    let mut named: Vec<(String, String)> = members
        .into_iter()
        .map(|m| {
            let path = Path::new(&m.path);
            let plain = format_file_name(path, m.missing, false, false);
            let shown = format_file_name(path, m.missing, false, color);
            (plain, shown)
        })
        .collect();
    named.sort_by(|a, b| a.0.cmp(&b.0));
    named.into_iter().map(|(_, shown)| shown).collect()
}

pub fn format_listing_text(view: &ListingView) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(entries) = &view.loose_entries {
        let mut named: Vec<(String, String)> = entries
            .iter()
            .map(|p| {
                (
                    format_file_name(p, false, false, false),
                    format_file_name(p, false, false, view.color),
                )
            })
            .collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        let shown: Vec<String> = named.into_iter().map(|(_, s)| s).collect();
        let grid = layout_grid(&shown, view.width);
        if !grid.is_empty() {
            sections.push(grid.join("\n"));
        }
    }

    if !view.groups.is_empty() {
        let mut lines = vec!["Groups:".to_string()];
        for group in &view.groups {
            lines.push(format!("  {}:", group.name));
            if group.members.is_empty() {
                lines.push("    (empty)".to_string());
            } else {
                lines.push(format!(
                    "    {}",
                    sorted_names(&group.members, view.color).join(" ")
                ));
            }
        }
        sections.push(lines.join("\n"));
    }

    if view.removed > 0 {
        sections.push(format!("Removed {} missing file(s)", view.removed));
    }

    sections.join("\n\n")
}

pub fn format_listing_json(listing: &[GroupListing]) -> Result<String, ApiError> {
    serde_json::to_string_pretty(listing).map_err(|e| ApiError::Render(e.to_string()))
}

/// Missing members per group, in listing order, omitting groups with none.
pub fn missing_by_group(listing: &[GroupListing]) -> Vec<CleanedGroup> {
    listing
        .iter()
        .filter_map(|group| {
            let removed: Vec<String> = group
                .members
                .iter()
                .filter(|m| m.missing)
                .map(|m| m.path.clone())
                .collect();
            (!removed.is_empty()).then(|| CleanedGroup {
                name: group.name.clone(),
                removed,
            })
        })
        .collect()
}

fn total_removed(groups: &[CleanedGroup]) -> usize {
    groups.iter().map(|g| g.removed.len()).sum()
}

pub fn format_clean_preview(missing: &[CleanedGroup], color: bool) -> String {
    let mut out = format!(
        "Found {} missing file(s) in {} group(s):",
        total_removed(missing),
        missing.len()
    );
    for group in missing {
        let statuses: Vec<MemberStatus> = group
            .removed
            .iter()
            .map(|path| MemberStatus {
                path: path.clone(),
                missing: true,
            })
            .collect();
        out.push_str(&format!(
            "\n\n{}:\n  {}",
            group.name,
            sorted_names(&statuses, color).join(" ")
        ));
    }
    out.push_str(&format!("\n\n{}", missing_legend(color)));
    out
}

pub fn format_clean_summary(cleaned: &[CleanedGroup]) -> String {
    format!(
        "Removed {} missing file(s) from {} group(s)",
        total_removed(cleaned),
        cleaned.len()
    )
}
