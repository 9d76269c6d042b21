//! WASM bindings for gridmark
//!
//! This module provides JavaScript-accessible functions for rendering grid
//! blocks and editing image embeds.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::{ImageAction, RenderContext, RenderOptions};

/// Render options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmRenderOptions {
    /// Info string of grid fences (default "grid")
    #[serde(default)]
    pub fence_language: Option<String>,
    /// Track height when a block sets none (default "200px")
    #[serde(default)]
    pub default_cell_height: Option<String>,
    /// Expand `![[file|mods]]` embeds into `<img>` tags
    #[serde(default = "default_true")]
    pub expand_embeds: bool,
    /// Prepend the grid stylesheet to rendered documents
    #[serde(default)]
    pub include_stylesheet: bool,
    /// Render every grid as invisible
    #[serde(default)]
    pub invisible_mode: bool,
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

/// Same defaults as `RenderOptions::default()`, used when JS passes no options
#[cfg(feature = "wasm")]
impl Default for WasmRenderOptions {
    fn default() -> Self {
        Self {
            fence_language: None,
            default_cell_height: None,
            expand_embeds: true,
            include_stylesheet: false,
            invisible_mode: false,
        }
    }
}

#[cfg(feature = "wasm")]
impl WasmRenderOptions {
    fn from_js(options: JsValue) -> Self {
        if options.is_undefined() || options.is_null() {
            return Self::default();
        }
        serde_wasm_bindgen::from_value(options).unwrap_or_default()
    }

    fn split(self) -> (RenderOptions, RenderContext) {
        let mut options = RenderOptions {
            expand_embeds: self.expand_embeds,
            include_stylesheet: self.include_stylesheet,
            ..RenderOptions::default()
        };
        if let Some(language) = self.fence_language {
            options.fence_language = language;
        }
        if let Some(height) = self.default_cell_height {
            options.default_cell_height = height;
        }
        let ctx = RenderContext {
            invisible_mode: self.invisible_mode,
        };
        (options, ctx)
    }
}

/// Image action (exposed to WASM), e.g. `{ "kind": "position", "value": "left" }`
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmImageAction {
    /// "position", "size" or "clear"
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[cfg(feature = "wasm")]
impl WasmImageAction {
    fn into_action(self) -> Result<ImageAction, String> {
        match (self.kind.as_str(), self.value) {
            ("position", Some(value)) => Ok(ImageAction::Position(value)),
            ("size", Some(value)) => Ok(ImageAction::Size(value)),
            ("clear", _) => Ok(ImageAction::Clear),
            (kind, _) => Err(format!("unsupported image action '{}'", kind)),
        }
    }
}

/// Operation result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmResult {
    /// The produced text or HTML
    pub output: String,
    /// Whether the operation was successful
    pub success: bool,
    /// Error message if the operation failed
    pub error: Option<String>,
    /// Warnings found along the way
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl WasmResult {
    fn ok(output: String, warnings: Vec<String>) -> Self {
        Self {
            output,
            success: true,
            error: None,
            warnings,
        }
    }

    fn err(message: String) -> Self {
        Self {
            output: String::new(),
            success: false,
            error: Some(message),
            warnings: vec![],
        }
    }
}

/// A parsed cell (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmCell {
    pub id: String,
    pub row: usize,
    pub column: usize,
    pub content: String,
}

/// A parsed grid block (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmGrid {
    pub columns: usize,
    pub rows: usize,
    pub show_borders: bool,
    pub cell_height: Option<String>,
    pub dynamic_height: bool,
    pub invisible: bool,
    pub col_widths: Option<String>,
    pub row_heights: Option<String>,
    pub cells: Vec<WasmCell>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse a grid block into settings and cells
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "parseGrid")]
pub fn parse_grid_wasm(input: &str) -> JsValue {
    let grid = crate::parse_grid(input);
    let settings = grid.settings;
    let dto = WasmGrid {
        columns: settings.columns,
        rows: settings.rows,
        show_borders: settings.show_borders,
        dynamic_height: settings.is_dynamic_height(),
        invisible: settings.is_invisible(),
        cell_height: settings.cell_height,
        col_widths: settings.col_widths,
        row_heights: settings.row_heights,
        cells: grid
            .cells
            .into_iter()
            .map(|c| WasmCell {
                id: c.id,
                row: c.row,
                column: c.column,
                content: c.content,
            })
            .collect(),
    };
    serde_wasm_bindgen::to_value(&dto).unwrap()
}

/// Render one grid block to HTML
///
/// # Arguments
/// * `input` - Text inside the grid fence
/// * `source_path` - Path of the note the block lives in
/// * `options` - `WasmRenderOptions` object (may be undefined)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderGridHtml")]
pub fn render_grid_html_wasm(input: &str, source_path: &str, options: JsValue) -> String {
    let opts = WasmRenderOptions::from_js(options);
    let (options, ctx) = opts.split();
    let renderer = crate::PulldownRenderer::from_options(&options);
    crate::render_block_html(input, source_path, &options, &ctx, &renderer)
}

/// Render a markdown document, grid blocks included
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderDocument")]
pub fn render_document_wasm(markdown: &str, source_path: &str, options: JsValue) -> JsValue {
    let opts = WasmRenderOptions::from_js(options);
    let (options, ctx) = opts.split();
    let out = crate::render_document(markdown, source_path, &options, &ctx);
    let warnings = out.warnings.iter().map(|w| w.to_string()).collect();
    serde_wasm_bindgen::to_value(&WasmResult::ok(out.content, warnings)).unwrap()
}

/// Empty fenced grid block of the given size
///
/// A fresh time-based id is generated when `id` is empty.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "gridTemplate")]
pub fn grid_template_wasm(columns: usize, rows: usize, id: &str) -> JsValue {
    let id = if id.is_empty() {
        crate::templates::generate_grid_id()
    } else {
        id.to_string()
    };
    let result = match crate::templates::grid_template(
        columns,
        rows,
        &id,
        crate::constants::DEFAULT_FENCE_LANGUAGE,
    ) {
        Ok(block) => WasmResult::ok(block, vec![]),
        Err(e) => WasmResult::err(e.to_string()),
    };
    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Apply an image action to the embed nearest `cursor_line` (0-based)
///
/// Returns the whole text with the rewritten line.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "rewriteImageLine")]
pub fn rewrite_image_line_wasm(text: &str, cursor_line: usize, action: JsValue) -> JsValue {
    let result = match serde_wasm_bindgen::from_value::<WasmImageAction>(action) {
        Ok(action) => match action.into_action() {
            Ok(action) => match crate::rewrite_image_line(text, cursor_line, &action) {
                Ok(updated) => WasmResult::ok(updated, vec![]),
                Err(e) => WasmResult::err(e.to_string()),
            },
            Err(message) => WasmResult::err(message),
        },
        Err(e) => WasmResult::err(format!("invalid image action: {}", e)),
    };
    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Check a grid block for settings and cells that will not render as written
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkGrid")]
pub fn check_grid_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_grid(input);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap()
}

/// Summary of grid check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// The stylesheet for the generated classes
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "gridStylesheet")]
pub fn grid_stylesheet() -> String {
    crate::styles::STYLESHEET.to_string()
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(all(feature = "wasm", test))]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_match_render_defaults() {
        let (options, ctx) = WasmRenderOptions::default().split();
        assert_eq!(options, RenderOptions::default());
        assert_eq!(ctx, RenderContext::default());
    }
}
