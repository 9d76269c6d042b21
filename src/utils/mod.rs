//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Host collaborator traits (markdown renderer, line editor)
//! - Error types and result types

pub mod diagnostics;
pub mod error;
pub mod host;

// Re-export commonly used items
pub use diagnostics::{check_grid, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{GridError, GridResult, RenderOutput, RenderWarning};
pub use host::{LineEditor, MarkdownRenderer, MemoryDocument};
