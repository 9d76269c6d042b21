//! Grid renderer
//!
//! A grid block is the body of a fenced code block:
//!
//! ```text
//! === start-grid: photos
//!
//! grid-settings
//! columns: 2
//! rows: 1
//!
//! === cell A1 ===
//! Left
//!
//! === cell B1 ===
//! Right
//!
//! === end-grid
//! ```
//!
//! It goes through three stages:
//!
//! - `parser`: block text → settings and cells
//! - `layout`: settings and cells → container classes, styles and one slot
//!   per address
//! - `inject`: cell markdown → HTML in each slot

pub mod cell;
pub mod inject;
pub mod layout;
pub mod parser;
pub mod settings;


pub use cell::{CellAddress, GridCell};
pub use inject::inject_content;
pub use layout::{build_layout, build_layout_with_height, GridLayout, Slot, SlotContent};
pub use parser::{parse_grid, parse_grid_with_diagnostics, GridParser, ParsedGrid};
pub use settings::{GridSettings, SettingOutcome};

use crate::core::context::{RenderContext, RenderOptions};
use crate::utils::host::MarkdownRenderer;
use tracing::error;

/// Parse, lay out and fill one grid block
///
/// Renderer failures are logged and the layout is returned as far as it got:
/// slots rendered before the failure keep their content, the rest stay empty.
pub fn render_block(
    input: &str,
    source_path: &str,
    options: &RenderOptions,
    ctx: &RenderContext,
    renderer: &dyn MarkdownRenderer,
) -> GridLayout {
    let grid = parse_grid(input);
    let mut layout = build_layout_with_height(
        &grid.settings,
        &grid.cells,
        ctx,
        &options.default_cell_height,
    );

    if let Err(e) = inject_content(&mut layout, &grid.cells, source_path, renderer) {
        error!(source = source_path, error = %e, "failed to render grid content");
    }

    layout
}

/// [`render_block`] serialized to HTML
pub fn render_block_html(
    input: &str,
    source_path: &str,
    options: &RenderOptions,
    ctx: &RenderContext,
    renderer: &dyn MarkdownRenderer,
) -> String {
    render_block(input, source_path, options, ctx, renderer).to_html()
}
