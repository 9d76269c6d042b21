//! Layout description for a parsed grid
//!
//! The builder produces a plain value, [`GridLayout`], that says which
//! classes and properties the container carries and what goes in each slot.
//! Turning it into markup is a separate step ([`GridLayout::to_html`]) so the
//! layout logic can be tested without any renderer.

use super::cell::{CellAddress, GridCell};
use super::settings::GridSettings;
use crate::core::context::RenderContext;
use crate::data::constants::{
    columns_class, CLASS_CELL, CLASS_CONTAINER, CLASS_DYNAMIC_HEIGHT, CLASS_INVISIBLE,
    CLASS_NO_BORDERS, CLASS_PLACEHOLDER, DEFAULT_CELL_HEIGHT, PROP_CELL_HEIGHT, PROP_COLUMNS,
    PROP_ROWS,
};
use std::collections::HashSet;
use std::fmt::Write;
use tracing::debug;

/// What a slot currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    /// No cell addresses this slot
    Placeholder,
    /// A cell exists; waiting for its content to be rendered
    Pending,
    /// Rendered HTML
    Rendered(String),
}

/// One grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Address id, e.g. `B1`
    pub id: String,
    /// 1-based CSS grid row
    pub grid_row: usize,
    /// 1-based CSS grid column
    pub grid_column: usize,
    pub content: SlotContent,
}

impl Slot {
    pub fn is_placeholder(&self) -> bool {
        self.content == SlotContent::Placeholder
    }
}

/// Complete description of a grid container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// Container classes, base class first
    pub classes: Vec<String>,
    /// Inline style declarations in emission order
    pub style: Vec<(String, String)>,
    /// Slots in row-major order
    pub slots: Vec<Slot>,
}

impl GridLayout {
    /// Find a slot by address id
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn slot_mut(&mut self, id: &str) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of an inline style property
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let style = self
            .style
            .iter()
            .map(|(p, v)| format!("{}: {};", p, v))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            out,
            r#"<div class="{}" style="{}">"#,
            escape_attr(&self.classes.join(" ")),
            escape_attr(&style)
        );

        for slot in &self.slots {
            let class = if slot.is_placeholder() {
                format!("{} {}", CLASS_CELL, CLASS_PLACEHOLDER)
            } else {
                CLASS_CELL.to_string()
            };
            let _ = write!(
                out,
                r#"<div class="{}" data-cell-id="{}" style="grid-row: {}; grid-column: {};">"#,
                class,
                escape_attr(&slot.id),
                slot.grid_row,
                slot.grid_column
            );
            if let SlotContent::Rendered(ref html) = slot.content {
                out.push_str(html);
            }
            out.push_str("</div>\n");
        }

        out.push_str("</div>");
        out
    }
}

/// Build the layout for a parsed grid
pub fn build_layout(
    settings: &GridSettings,
    cells: &[GridCell],
    ctx: &RenderContext,
) -> GridLayout {
    build_layout_with_height(settings, cells, ctx, DEFAULT_CELL_HEIGHT)
}

/// Build the layout, using `default_cell_height` when the block sets no
/// `cell-height`
pub fn build_layout_with_height(
    settings: &GridSettings,
    cells: &[GridCell],
    ctx: &RenderContext,
    default_cell_height: &str,
) -> GridLayout {
    let (columns, rows) = (settings.columns, settings.rows);

    let mut classes = vec![CLASS_CONTAINER.to_string()];
    if !settings.show_borders {
        classes.push(CLASS_NO_BORDERS.to_string());
    }
    if settings.is_dynamic_height() {
        classes.push(CLASS_DYNAMIC_HEIGHT.to_string());
    }
    if settings.is_invisible() || ctx.invisible_mode {
        classes.push(CLASS_INVISIBLE.to_string());
    }
    classes.push(columns_class(columns));

    let mut style = vec![
        (PROP_COLUMNS.to_string(), columns.to_string()),
        (PROP_ROWS.to_string(), rows.to_string()),
    ];

    let template_columns = match settings.col_widths {
        Some(ref widths) => widths.clone(),
        None => format!("repeat({}, minmax(0, 1fr))", columns),
    };
    style.push(("grid-template-columns".to_string(), template_columns));

    match settings.row_heights {
        Some(ref heights) => {
            style.push(("grid-template-rows".to_string(), heights.clone()));
        }
        None if settings.is_dynamic_height() => {
            style.push((
                "grid-template-rows".to_string(),
                format!("repeat({}, minmax(min-content, max-content))", rows),
            ));
        }
        None => {
            let height = settings
                .cell_height
                .as_deref()
                .unwrap_or(default_cell_height);
            style.push((PROP_CELL_HEIGHT.to_string(), height.to_string()));
            style.push((
                "grid-template-rows".to_string(),
                format!("repeat({}, var({}))", rows, PROP_CELL_HEIGHT),
            ));
        }
    }

    let known: HashSet<&str> = cells.iter().map(|c| c.id.as_str()).collect();
    let mut slots = Vec::with_capacity(settings.slot_count());
    for row in 0..rows {
        for column in 0..columns {
            let id = CellAddress::new(row, column).id();
            let content = if known.contains(id.as_str()) {
                SlotContent::Pending
            } else {
                SlotContent::Placeholder
            };
            slots.push(Slot {
                id,
                grid_row: row + 1,
                grid_column: column + 1,
                content,
            });
        }
    }

    debug!(
        slots = slots.len(),
        placeholders = slots.iter().filter(|s| s.is_placeholder()).count(),
        "built grid layout"
    );

    GridLayout {
        columns,
        rows,
        classes,
        style,
        slots,
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
