//! Error handling for gridmark
//!
//! This module provides a unified error type and result type for the
//! rendering and image-rewriting operations.

use std::fmt;

/// Gridmark error type
#[derive(Debug, Clone)]
pub enum GridError {
    /// The markdown renderer failed on a cell's content
    RenderError {
        message: String,
        cell: Option<String>,
    },
    /// No embedded image reference near the cursor
    ImageNotFound { line: usize },
    /// A line index outside the document
    LineOutOfRange { line: usize, line_count: usize },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::RenderError { message, cell } => {
                if let Some(id) = cell {
                    write!(f, "Render error in cell {}: {}", id, message)
                } else {
                    write!(f, "Render error: {}", message)
                }
            }
            GridError::ImageNotFound { line } => {
                write!(f, "No image found near line {}", line + 1)
            }
            GridError::LineOutOfRange { line, line_count } => {
                write!(
                    f,
                    "Line {} is outside the document ({} lines)",
                    line + 1,
                    line_count
                )
            }
            GridError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            GridError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for GridError {}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for gridmark operations
pub type GridResult<T> = Result<T, GridError>;

/// Non-fatal issues found while rendering
#[derive(Debug, Clone)]
pub struct RenderWarning {
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "Warning at line {}: {}", l, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Render output with optional warnings
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered HTML
    pub content: String,
    /// Any warnings generated while rendering
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<RenderWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl GridError {
    pub fn render(message: impl Into<String>) -> Self {
        GridError::RenderError {
            message: message.into(),
            cell: None,
        }
    }

    pub fn render_in_cell(message: impl Into<String>, cell: impl Into<String>) -> Self {
        GridError::RenderError {
            message: message.into(),
            cell: Some(cell.into()),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        GridError::InvalidInput {
            message: message.into(),
        }
    }

    /// Attach a cell id to a render error that lacks one
    pub fn in_cell(self, id: &str) -> Self {
        match self {
            GridError::RenderError {
                message,
                cell: None,
            } => GridError::RenderError {
                message,
                cell: Some(id.to_string()),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        let err = GridError::render("renderer crashed");
        assert!(err.to_string().contains("Render error"));
        assert!(err.to_string().contains("renderer crashed"));
    }

    #[test]
    fn test_render_error_with_cell() {
        let err = GridError::render("boom").in_cell("B2");
        let msg = err.to_string();
        assert!(msg.contains("cell B2"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_in_cell_keeps_existing_cell() {
        let err = GridError::render_in_cell("boom", "A1").in_cell("C3");
        assert!(err.to_string().contains("A1"));
    }

    #[test]
    fn test_image_not_found_is_one_based() {
        let err = GridError::ImageNotFound { line: 4 };
        assert_eq!(err.to_string(), "No image found near line 5");
    }

    #[test]
    fn test_render_output() {
        let output = RenderOutput::new("<div></div>".to_string());
        assert!(!output.has_warnings());

        let output_with_warn = RenderOutput::with_warnings(
            "<div></div>".to_string(),
            vec![RenderWarning {
                message: "unknown key".to_string(),
                line: Some(3),
                suggestion: None,
            }],
        );
        assert!(output_with_warn.has_warnings());
    }
}
