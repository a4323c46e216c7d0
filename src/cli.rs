//! CLI domain: parse, route, output, and presentation only.
//! No store logic; a single route table dispatches to the group store.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, EXIT_FAILURE, EXIT_USER_ERROR};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_add_result, format_clean_preview, format_clean_summary, format_file_name,
    format_listing_json, format_listing_text, layout_grid, missing_by_group, missing_legend,
    terminal_width, FileKind, ListingView, DEFAULT_TERMINAL_WIDTH,
};
pub use route::{ConfirmPrompt, DialoguerPrompt, RunContext};
