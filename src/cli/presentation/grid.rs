//! Column grid layout for file names, sized like `ls`.

use console::{measure_text_width, Term};

/// Fallback when stdout is not a terminal.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

const COLUMN_GAP: usize = 2;

/// Width of the attached terminal, or [`DEFAULT_TERMINAL_WIDTH`].
pub fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .filter(|cols| *cols > 0)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Lay `items` out in rows of equal-width columns.
///
/// Widths are measured on visible text, so styled items align with plain ones.
/// Items keep their given order, filled row by row.
pub fn layout_grid(items: &[String], width: usize) -> Vec<String> {
    let Some(longest) = items.iter().map(|item| measure_text_width(item)).max() else {
        return Vec::new();
    };
    let column_width = longest + COLUMN_GAP;
    let columns = (width / column_width).max(1);

    items
        .chunks(columns)
        .map(|row| {
            let mut line = String::new();
            let last = row.len() - 1;
            for (index, item) in row.iter().enumerate() {
                line.push_str(item);
                if index < last {
                    let pad = column_width - measure_text_width(item);
                    line.push_str(&" ".repeat(pad));
                }
            }
            line
        })
        .collect()
}
