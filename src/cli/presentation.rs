//! CLI presentation: text and json formatters per command family.

mod grid;
mod groups;
mod style;

pub use grid::{layout_grid, terminal_width, DEFAULT_TERMINAL_WIDTH};
pub use groups::{
    format_add_result, format_clean_preview, format_clean_summary, format_listing_json,
    format_listing_text, missing_by_group, ListingView,
};
pub use style::{format_file_name, missing_legend, FileKind};
