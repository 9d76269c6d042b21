//! Grid block templates
//!
//! Produces a ready-to-fill fenced block for a requested size: the start
//! sentinel, a settings section and one empty cell per address.
//!
//! ## Example
//!
//! ```rust
//! use gridmark::templates::grid_template;
//!
//! let block = grid_template(2, 1, "photos", "grid").unwrap();
//! assert!(block.starts_with("```grid\n=== start-grid: photos\n"));
//! assert!(block.contains("=== cell B1 ==="));
//! ```

use crate::core::grid::{CellAddress, GridSettings};
use crate::data::constants::{END_MARKER, MAX_GRID_TRACKS, START_MARKER_PREFIX};
use crate::utils::error::{GridError, GridResult};
use chrono::Local;
use std::fmt::Write;

/// Fresh block id based on the local time, e.g. `grid-20240131-154502`
pub fn generate_grid_id() -> String {
    format!("grid-{}", Local::now().format("%Y%m%d-%H%M%S"))
}

/// Fenced grid block with `columns × rows` empty cells
pub fn grid_template(
    columns: usize,
    rows: usize,
    id: &str,
    fence_language: &str,
) -> GridResult<String> {
    if columns == 0 || rows == 0 {
        return Err(GridError::invalid("a grid needs at least one row and one column"));
    }
    if columns > CellAddress::MAX_COLUMNS {
        return Err(GridError::invalid(format!(
            "at most {} columns can be addressed, got {}",
            CellAddress::MAX_COLUMNS,
            columns
        )));
    }
    if rows > MAX_GRID_TRACKS {
        return Err(GridError::invalid(format!(
            "at most {} rows are allowed, got {}",
            MAX_GRID_TRACKS, rows
        )));
    }

    let settings = GridSettings::with_size(columns, rows);
    let mut out = String::new();
    let _ = writeln!(out, "```{}", fence_language);
    let _ = writeln!(out, "{}: {}", START_MARKER_PREFIX, id);
    out.push('\n');
    out.push_str(&settings.to_settings_block());
    out.push('\n');

    for row in 0..rows {
        for column in 0..columns {
            let _ = writeln!(out, "=== cell {} ===", CellAddress::new(row, column));
            out.push('\n');
        }
    }

    out.push_str(END_MARKER);
    out.push_str("\n```\n");
    Ok(out)
}
