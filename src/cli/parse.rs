//! CLI parse: clap types for Groupie. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Groupie - Virtual file grouper with missing file management
#[derive(Parser, Debug)]
#[command(name = "gr", version)]
#[command(about = "Virtual file grouper with missing file management")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Groups file (overrides storage.groups_file; default: ~/.file_groups.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored file names
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging, mirrored to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new group with the given NAME
    Create {
        name: String,
    },
    /// Add one or more FILES to the specified group NAME
    Add {
        name: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List all groups and files, flagging missing files
    #[command(name = "ls")]
    List {
        /// Automatically remove missing files during listing
        #[arg(short, long)]
        clean: bool,
        /// Don't display files in the current directory
        #[arg(short, long)]
        no_files: bool,
        /// Show hidden files (starting with .)
        #[arg(short, long)]
        all: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Remove missing files from all groups
    Clean {
        /// Skip confirmation and clean automatically
        #[arg(short = 'y')]
        yes: bool,
    },
    /// Remove a group
    RemoveGroup {
        name: String,
    },
    /// Remove a file from a group
    RemoveFile {
        group_name: String,
        file: PathBuf,
    },
}

/// Output format for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
