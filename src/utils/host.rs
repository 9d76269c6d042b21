//! Host collaborators
//!
//! The grid renderer and the image modifier run inside a host application
//! that owns markdown rendering and the open document. Both are reached
//! through traits so the core can be driven by the bundled implementations,
//! by the WASM bindings, or by test doubles:
//!
//! - `MarkdownRenderer`: markdown → HTML for one cell
//! - `LineEditor`: line-indexed read/write of the active document

use crate::utils::error::{GridError, GridResult};

/// Renders cell markdown to HTML
pub trait MarkdownRenderer {
    /// Render `markdown`; `source_path` is the document the block came from,
    /// used to resolve relative links
    fn render(&self, markdown: &str, source_path: &str) -> GridResult<String>;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str, &str) -> GridResult<String>,
{
    fn render(&self, markdown: &str, source_path: &str) -> GridResult<String> {
        self(markdown, source_path)
    }
}

/// Line-indexed access to the document being edited
pub trait LineEditor {
    /// Number of lines in the document
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator
    fn line(&self, index: usize) -> Option<&str>;

    /// Replace a line's text
    fn set_line(&mut self, index: usize, text: &str) -> GridResult<()>;
}

/// In-memory document (CLI edits, tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl MemoryDocument {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Reassemble the document, keeping a trailing newline if it had one
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

impl LineEditor for MemoryDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn set_line(&mut self, index: usize, text: &str) -> GridResult<()> {
        let line_count = self.lines.len();
        match self.lines.get_mut(index) {
            Some(line) => {
                *line = text.to_string();
                Ok(())
            }
            None => Err(GridError::LineOutOfRange {
                line: index,
                line_count,
            }),
        }
    }
}

/// Resolve `relative` against the directory of the document at `base`
pub fn resolve_relative(base: &str, relative: &str) -> String {
    if relative.starts_with('/') || relative.starts_with('\\') || relative.contains("://") {
        relative.to_string()
    } else if let Some(last_sep) = base.rfind(['/', '\\']) {
        format!("{}/{}", &base[..last_sep], relative)
    } else {
        relative.to_string()
    }
}
