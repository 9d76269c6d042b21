//! Whole-document rendering
//!
//! Walks a markdown document, hands every fenced block tagged with the grid
//! language to the grid renderer and renders everything else as ordinary
//! markdown.
//!
//! ## Example
//!
//! ```rust
//! use gridmark::core::{RenderContext, RenderOptions};
//! use gridmark::document::render_document;
//!
//! let md = "# Trip\n\n```grid\n=== cell A1 ===\nDay one\n```\n";
//! let out = render_document(md, "trip.md", &RenderOptions::default(), &RenderContext::default());
//! assert!(out.content.contains("<h1>Trip</h1>"));
//! assert!(out.content.contains(r#"data-cell-id="A1""#));
//! ```

use crate::core::context::{RenderContext, RenderOptions};
use crate::core::grid::render_block_html;
use crate::data::styles::STYLESHEET;
use crate::features::markdown::{cmark_options, EmbedExpander, PulldownRenderer};
use crate::utils::diagnostics::{check_grid, CheckResult, DiagnosticLevel};
use crate::utils::error::{RenderOutput, RenderWarning};
use crate::utils::host::MarkdownRenderer;
use pulldown_cmark::utils::TextMergeStream;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};
use tracing::debug;

/// A grid block found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBlock {
    /// 1-based line of the opening fence
    pub fence_line: usize,
    /// Text between the fences
    pub body: String,
}

/// Whether a fence info string selects the grid renderer
fn is_grid_fence(kind: &CodeBlockKind<'_>, language: &str) -> bool {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next() == Some(language),
        CodeBlockKind::Indented => false,
    }
}

/// Every grid block in `markdown`, in document order
pub fn extract_grid_blocks(markdown: &str, language: &str) -> Vec<GridBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<GridBlock> = None;

    for (event, range) in Parser::new_ext(markdown, cmark_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(ref kind)) if is_grid_fence(kind, language) => {
                current = Some(GridBlock {
                    fence_line: line_of(markdown, range.start),
                    body: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }

    blocks
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// Render a document with the bundled pulldown-cmark renderer
pub fn render_document(
    markdown: &str,
    source_path: &str,
    options: &RenderOptions,
    ctx: &RenderContext,
) -> RenderOutput {
    let renderer = PulldownRenderer::from_options(options);
    render_document_with(markdown, source_path, options, ctx, &renderer)
}

/// Render a document, using `renderer` for cell content
pub fn render_document_with(
    markdown: &str,
    source_path: &str,
    options: &RenderOptions,
    ctx: &RenderContext,
    renderer: &dyn MarkdownRenderer,
) -> RenderOutput {
    let parser = TextMergeStream::new(Parser::new_ext(markdown, cmark_options()));
    let mut expander = EmbedExpander::new(source_path, options.expand_embeds);
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut grid_body: Option<String> = None;
    let mut block_count = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(ref kind))
                if is_grid_fence(kind, &options.fence_language) =>
            {
                grid_body = Some(String::new());
            }
            Event::Text(ref text) if grid_body.is_some() => {
                if let Some(body) = grid_body.as_mut() {
                    body.push_str(text);
                }
            }
            Event::End(TagEnd::CodeBlock) if grid_body.is_some() => {
                let body = grid_body.take().unwrap_or_default();
                let mut html = render_block_html(&body, source_path, options, ctx, renderer);
                html.push('\n');
                events.push(Event::Html(CowStr::from(html)));
                block_count += 1;
            }
            other => expander.push(other, &mut events),
        }
    }

    let mut content = String::new();
    if options.include_stylesheet {
        content.push_str("<style>\n");
        content.push_str(STYLESHEET);
        content.push_str("</style>\n");
    }
    html::push_html(&mut content, events.into_iter());
    debug!(source = source_path, grids = block_count, "rendered document");

    let warnings = check_document(markdown, options)
        .diagnostics
        .into_iter()
        .filter(|d| d.level != DiagnosticLevel::Info)
        .map(|d| RenderWarning {
            message: d.message,
            line: d.line,
            suggestion: d.suggestion,
        })
        .collect();

    RenderOutput::with_warnings(content, warnings)
}

/// Check every grid block in a document; line numbers refer to the document
pub fn check_document(markdown: &str, options: &RenderOptions) -> CheckResult {
    let mut result = CheckResult::new();
    for block in extract_grid_blocks(markdown, &options.fence_language) {
        for diag in check_grid(&block.body).diagnostics {
            // Block lines start on the line after the fence
            result.add(diag.offset_line(block.fence_line));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GridResult;

    const DOC: &str = "# Title\n\
\n\
Intro ![[cover.png|large]]\n\
\n\
```grid\n\
=== start-grid: g\n\
\n\
grid-settings\n\
columns: 2\n\
rows: 1\n\
\n\
=== cell A1 ===\n\
**left**\n\
=== cell B1 ===\n\
right\n\
=== end-grid\n\
```\n\
\n\
```rust\n\
let x = 1;\n\
```\n";

    #[test]
    fn test_extract_blocks() {
        let blocks = extract_grid_blocks(DOC, "grid");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].fence_line, 5);
        assert!(blocks[0].body.starts_with("=== start-grid: g\n"));
        assert!(blocks[0].body.contains("=== cell B1 ==="));
    }

    #[test]
    fn test_fence_language_with_attributes() {
        let blocks = extract_grid_blocks("```grid title\n=== cell A1 ===\nx\n```\n", "grid");
        assert_eq!(blocks.len(), 1);
        assert!(extract_grid_blocks("```gridlike\nx\n```\n", "grid").is_empty());
    }

    #[test]
    fn test_render_document() {
        let out = render_document(
            DOC,
            "notes/trip.md",
            &RenderOptions::default(),
            &RenderContext::default(),
        );
        let html = &out.content;
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains(r#"<img src="notes/cover.png" alt="cover.png" class="grid-embed-large" />"#));
        assert!(html.contains(r#"<div class="grid-container grid-cols-2""#));
        assert!(html.contains("<strong>left</strong>"));
        assert!(html.contains("<p>right</p>"));
        assert!(html.contains("let x = 1;"));
        assert!(!html.contains("=== cell"));
        assert!(!html.contains("<style>"));
        assert!(!out.has_warnings());
    }

    #[test]
    fn test_stylesheet_option() {
        let out = render_document(
            "text",
            "a.md",
            &RenderOptions::standalone(),
            &RenderContext::default(),
        );
        assert!(out.content.starts_with("<style>\n.grid-container"));
    }

    #[test]
    fn test_custom_fence_language() {
        let md = "```layout\n=== cell A1 ===\nx\n```\n";
        let opts = RenderOptions::default().with_fence_language("layout");
        let out = render_document(md, "a.md", &opts, &RenderContext::default());
        assert!(out.content.contains("grid-container"));

        let out = render_document(md, "a.md", &RenderOptions::default(), &RenderContext::default());
        assert!(!out.content.contains("grid-container"));
        assert!(out.content.contains("=== cell A1 ==="));
    }

    #[test]
    fn test_warnings_carry_document_lines() {
        let md = "intro\n\n```grid\ngrid-settings\ncolumns: x\n\n=== cell A1 ===\nhi\n```\n";
        let out = render_document(md, "a.md", &RenderOptions::default(), &RenderContext::default());
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, Some(5));
    }

    #[test]
    fn test_invisible_context() {
        let md = "```grid\n=== cell A1 ===\nx\n```\n";
        let out = render_document(md, "a.md", &RenderOptions::default(), &RenderContext::invisible());
        assert!(out.content.contains("grid-invisible"));
    }

    #[test]
    fn test_custom_renderer() {
        let renderer = |md: &str, _: &str| -> GridResult<String> { Ok(md.to_uppercase()) };
        let md = "```grid\n=== cell A1 ===\nshout\n```\n";
        let out = render_document_with(
            md,
            "a.md",
            &RenderOptions::default(),
            &RenderContext::default(),
            &renderer,
        );
        assert!(out.content.contains(">SHOUT</div>"));
    }
}
