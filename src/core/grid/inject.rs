//! Rendering cell content into layout slots

use super::cell::GridCell;
use super::layout::{GridLayout, SlotContent};
use crate::features::images::post_process_images;
use crate::utils::error::GridResult;
use crate::utils::host::MarkdownRenderer;
use tracing::{debug, trace};

/// Render each cell's markdown into its slot, in cell order
///
/// Cells without a slot (outside the grid) are skipped. A later cell with the
/// same id replaces the earlier one's content. The first renderer failure
/// stops injection; slots filled before it keep their content.
pub fn inject_content(
    layout: &mut GridLayout,
    cells: &[GridCell],
    source_path: &str,
    renderer: &dyn MarkdownRenderer,
) -> GridResult<()> {
    let columns = layout.columns;

    for cell in cells {
        let Some(slot) = layout.slot_mut(&cell.id) else {
            debug!(cell = %cell.id, "no slot for cell, skipping");
            continue;
        };

        let html = renderer
            .render(&cell.content, source_path)
            .map_err(|e| e.in_cell(&cell.id))?;
        trace!(cell = %cell.id, bytes = html.len(), "rendered cell");

        slot.content = SlotContent::Rendered(post_process_images(&html, columns));
    }

    Ok(())
}
