//! CLI route: single route table and run context. Dispatches to the group store and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_add_result, format_clean_preview, format_clean_summary, format_listing_json,
    format_listing_text, missing_by_group, terminal_width, ListingView,
};
use crate::config::GroupieConfig;
use crate::error::{ApiError, StoreError};
use crate::store::{
    resolve_member, resolve_path, GroupListing, GroupStore, MemberStatus, StoreOptions,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CLEAN_PROMPT: &str = "Do you want to remove these missing files?";

/// Yes/no confirmation shown before destructive commands.
pub trait ConfirmPrompt {
    /// Show `preview`, then ask `question`. Declining returns `Ok(false)`.
    fn confirm(&self, preview: &str, question: &str) -> Result<bool, ApiError>;
}

/// Interactive prompt on the attached terminal.
pub struct DialoguerPrompt;

impl ConfirmPrompt for DialoguerPrompt {
    fn confirm(&self, preview: &str, question: &str) -> Result<bool, ApiError> {
        println!("{}\n", preview);
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| ApiError::Prompt(e.to_string()))
    }
}

/// Runtime context for CLI execution: store location, display settings and prompt.
pub struct RunContext {
    store_options: StoreOptions,
    color: bool,
    show_hidden: bool,
    cwd: PathBuf,
    terminal_width: usize,
    prompt: Box<dyn ConfirmPrompt>,
}

impl RunContext {
    /// Build from loaded config plus the `--store` and `--no-color` overrides.
    pub fn new(
        config: &GroupieConfig,
        store: Option<PathBuf>,
        no_color: bool,
    ) -> Result<Self, ApiError> {
        let mut storage = config.storage.clone();
        if let Some(store) = store {
            storage.groups_file = Some(store);
        }
        let store_options = storage.store_options()?;
        let cwd = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Cannot determine current directory: {}", e))
        })?;

        Ok(Self {
            store_options,
            color: config.display.color && !no_color && console::colors_enabled(),
            show_hidden: config.display.show_hidden,
            cwd,
            terminal_width: terminal_width(),
            prompt: Box::new(DialoguerPrompt),
        })
    }

    /// Directory that relative paths and `ls` are evaluated against.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_terminal_width(mut self, width: usize) -> Self {
        self.terminal_width = width;
        self
    }

    pub fn with_prompt(mut self, prompt: Box<dyn ConfirmPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn store_options(&self) -> &StoreOptions {
        &self.store_options
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(?command, store = %self.store_options.groups_file.display(), "Executing command");
        match command {
            Commands::Create { name } => self.handle_create(name),
            Commands::Add { name, files } => self.handle_add(name, files),
            Commands::List {
                clean,
                no_files,
                all,
                format,
            } => self.handle_list(*clean, *no_files, *all, *format),
            Commands::Clean { yes } => self.handle_clean(*yes),
            Commands::RemoveGroup { name } => self.handle_remove_group(name),
            Commands::RemoveFile { group_name, file } => self.handle_remove_file(group_name, file),
        }
    }

    fn open_store(&self) -> Result<GroupStore, ApiError> {
        Ok(GroupStore::open(&self.store_options)?)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    fn handle_create(&self, name: &str) -> Result<String, ApiError> {
        let mut store = self.open_store()?;
        if !store.create_group(name)? {
            return Err(StoreError::GroupAlreadyExists(name.to_string()).into());
        }
        Ok(format!("Group '{}' created successfully", name))
    }

    fn handle_add(&self, name: &str, files: &[PathBuf]) -> Result<String, ApiError> {
        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            let path = self.absolute(file);
            if !path.exists() {
                return Err(ApiError::PathNotFound(file.clone()));
            }
            paths.push(path);
        }

        let mut store = self.open_store()?;
        let outcome = store.add_files(name, &paths)?;
        Ok(format_add_result(name, &outcome))
    }

    fn handle_list(
        &self,
        clean: bool,
        no_files: bool,
        all: bool,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let mut store = self.open_store()?;
        let listing = store.list_groups(clean)?;
        drop(store);

        if format == OutputFormat::Json {
            return format_listing_json(&listing);
        }

        let removed = if clean {
            listing
                .iter()
                .map(|g| g.members.iter().filter(|m| m.missing).count())
                .sum()
        } else {
            0
        };

        let cwd = resolve_path(&self.cwd)?;
        let loose_entries = if no_files {
            None
        } else {
            Some(loose_entries(&cwd, &listing, all || self.show_hidden))
        };

        Ok(format_listing_text(&ListingView {
            loose_entries,
            groups: groups_in_dir(&listing, &cwd),
            removed,
            color: self.color,
            width: self.terminal_width,
        }))
    }

    fn handle_clean(&self, yes: bool) -> Result<String, ApiError> {
        let mut store = self.open_store()?;
        let missing = missing_by_group(&store.list_groups(false)?);
        if missing.is_empty() {
            return Ok("No missing files found".to_string());
        }

        if !yes {
            let preview = format_clean_preview(&missing, self.color);
            if !self.prompt.confirm(&preview, CLEAN_PROMPT)? {
                return Ok("Operation cancelled".to_string());
            }
        }

        let cleaned = store.clean_groups()?;
        Ok(format_clean_summary(&cleaned))
    }

    fn handle_remove_group(&self, name: &str) -> Result<String, ApiError> {
        let mut store = self.open_store()?;
        if !store.remove_group(name)? {
            return Err(ApiError::NoSuchGroup(name.to_string()));
        }
        Ok(format!("Group '{}' removed", name))
    }

    fn handle_remove_file(&self, group_name: &str, file: &Path) -> Result<String, ApiError> {
        let mut store = self.open_store()?;
        if !store.remove_file(group_name, &self.absolute(file))? {
            return Err(ApiError::FileNotInGroup {
                group: group_name.to_string(),
                path: file.to_path_buf(),
            });
        }
        Ok(format!("File removed from group '{}'", group_name))
    }
}

/// Entries of `dir` that no group claims. Directories are always shown.
fn loose_entries(dir: &Path, listing: &[GroupListing], show_hidden: bool) -> Vec<PathBuf> {
    let grouped: HashSet<&str> = listing
        .iter()
        .flat_map(|g| g.members.iter())
        .filter(|m| !m.missing)
        .map(|m| m.path.as_str())
        .collect();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to list directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            let hidden = path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(false);
            show_hidden || !hidden
        })
        .filter(|path| {
            if path.is_dir() {
                return true;
            }
            path.is_file()
                && resolve_member(path)
                    .map(|member| !grouped.contains(member.as_str()))
                    .unwrap_or(true)
        })
        .collect()
}

/// Groups holding at least one existing file directly in `dir`, narrowed to
/// those files plus every missing member.
fn groups_in_dir(listing: &[GroupListing], dir: &Path) -> Vec<GroupListing> {
    listing
        .iter()
        .filter_map(|group| {
            let mut present_here = false;
            let members: Vec<MemberStatus> = group
                .members
                .iter()
                .filter(|m| {
                    if m.missing {
                        return true;
                    }
                    let here = Path::new(&m.path).parent() == Some(dir);
                    present_here |= here;
                    here
                })
                .cloned()
                .collect();
            present_here.then(|| GroupListing {
                name: group.name.clone(),
                members,
            })
        })
        .collect()
}
