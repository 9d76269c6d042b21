//! # gridmark
//!
//! Grid layouts and image embeds for markdown notes.
//!
//! ## Features
//!
//! - **Grid blocks**: a fenced block describes a fixed grid of cells, each
//!   holding its own markdown; it renders to a CSS grid container
//! - **Image embeds**: find the `![[file|mods]]` embed nearest a cursor and
//!   set or clear its position and size modifiers
//! - **Documents**: render whole markdown documents with pulldown-cmark,
//!   grid blocks included
//! - **Diagnostics**: report settings and cells that rendering silently
//!   coerces or drops
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Rendering a Grid Block
//!
//! ```rust
//! use gridmark::render_grid;
//!
//! let html = render_grid(
//!     "grid-settings\ncolumns: 2\nrows: 1\n\n=== cell A1 ===\n**Left**\n=== cell B1 ===\nRight",
//!     "notes/today.md",
//! );
//! assert!(html.contains("grid-cols-2"));
//! assert!(html.contains("<strong>Left</strong>"));
//! ```
//!
//! ### Editing an Image Embed
//!
//! ```rust
//! use gridmark::{rewrite_image_line, ImageAction};
//!
//! let text = "intro\n![[cat.png|left|small]]\n";
//! let updated = rewrite_image_line(text, 0, &ImageAction::Position("right".into())).unwrap();
//! assert_eq!(updated, "intro\n![[cat.png|right|small]]\n");
//! ```

/// Core grid and image modules
pub mod core;

/// Data layer - markers, keywords and the stylesheet
pub mod data;

/// Feature modules - documents, images, templates
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core operations
pub use core::grid;
pub use core::image;
pub use core::{
    apply_image_action, build_layout, inject_content, locate_image, parse_grid, render_block,
    render_block_html, rewrite_modifiers, GridCell, GridLayout, GridSettings, ImageAction,
    ImageMatch, ImageReference, ModifierKeywords, ParsedGrid, RenderContext, RenderOptions, Slot,
    SlotContent,
};

// Re-export data modules
pub use data::constants;
pub use data::styles;

// Re-export feature modules
pub use features::document;
pub use features::images;
pub use features::markdown;
pub use features::templates;
pub use features::{render_document, PulldownRenderer};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{GridError, GridResult, RenderOutput, RenderWarning};
pub use utils::host;
pub use utils::host::{LineEditor, MarkdownRenderer, MemoryDocument};

/// Render one grid block (the text inside the fence) to HTML
///
/// Uses the default options and the bundled pulldown-cmark renderer.
pub fn render_grid(input: &str, source_path: &str) -> String {
    render_grid_with_options(input, source_path, &RenderOptions::default())
}

/// Render one grid block to HTML with custom options
pub fn render_grid_with_options(input: &str, source_path: &str, options: &RenderOptions) -> String {
    let renderer = PulldownRenderer::from_options(options);
    render_block_html(
        input,
        source_path,
        options,
        &RenderContext::default(),
        &renderer,
    )
}

/// Render a markdown document, grid blocks included
pub fn render_markdown(markdown: &str, source_path: &str) -> RenderOutput {
    render_document(
        markdown,
        source_path,
        &RenderOptions::default(),
        &RenderContext::default(),
    )
}

/// Apply `action` to the embed nearest `cursor_line` in `text`
///
/// Returns the whole text with that one line rewritten.
pub fn rewrite_image_line(
    text: &str,
    cursor_line: usize,
    action: &ImageAction,
) -> GridResult<String> {
    let mut doc = MemoryDocument::new(text);
    apply_image_action(&mut doc, cursor_line, action, &ModifierKeywords::default())?;
    Ok(doc.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_grid_basic() {
        let html = render_grid("=== cell A1 ===\nhello", "a.md");
        assert!(html.starts_with(r#"<div class="grid-container grid-cols-2""#));
        assert!(html.contains("<p>hello</p>"));
        assert_eq!(html.matches("grid-cell-empty").count(), 3);
    }

    #[test]
    fn test_render_grid_options() {
        let opts = RenderOptions {
            default_cell_height: "120px".to_string(),
            ..Default::default()
        };
        let html = render_grid_with_options("=== cell A1 ===\nx", "a.md", &opts);
        assert!(html.contains("--grid-cell-height: 120px;"));
    }

    #[test]
    fn test_render_markdown() {
        let out = render_markdown("# Hi\n\n```grid\n=== cell A1 ===\nx\n```\n", "a.md");
        assert!(out.content.contains("<h1>Hi</h1>"));
        assert!(out.content.contains("grid-container"));
    }

    #[test]
    fn test_rewrite_image_line() {
        let text = "a\nb\n![[pic.png|large]]\n";
        let updated = rewrite_image_line(text, 1, &ImageAction::Size("small".into())).unwrap();
        assert_eq!(updated, "a\nb\n![[pic.png|small]]\n");
    }

    #[test]
    fn test_rewrite_image_line_not_found() {
        let err = rewrite_image_line("a\nb\nc\nd\n![[pic.png]]", 0, &ImageAction::Clear).unwrap_err();
        assert!(matches!(err, GridError::ImageNotFound { line: 0 }));
    }

    #[test]
    fn test_clear_action() {
        let updated =
            rewrite_image_line("![[pic.png|center|medium|alt=x]]", 0, &ImageAction::Clear).unwrap();
        assert_eq!(updated, "![[pic.png|alt=x]]");
    }
}
