//! Grid block diagnostics
//!
//! Rendering never surfaces problems in a block: bad values fall back to
//! defaults and unplaceable cells are dropped. This module reports those
//! silent decisions so a block can be checked before it is published:
//!
//! - Unknown or malformed settings
//! - Cell markers that address no row
//! - Duplicate cells (the later one wins)
//! - Cells outside the configured grid
//! - Text outside any cell
//!
//! ## Example
//!
//! ```rust
//! use gridmark::diagnostics::{check_grid, DiagnosticLevel};
//!
//! let result = check_grid("grid-settings\ncolumns: 1\n\n=== cell B1 ===\nlost");
//! assert!(result.has_errors());
//! ```

use crate::core::grid::{parse_grid_with_diagnostics, CellAddress, GridCell};
use std::collections::HashMap;
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the block renders, but not as written
    Warning,
    /// Error - content in the block will not appear in the output
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Shift the line number by `offset` (for blocks embedded in a document)
    pub fn offset_line(mut self, offset: usize) -> Self {
        self.line = self.line.map(|l| l + offset);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(line) = self.line {
            write!(f, "\n  --> line {}", line)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Merge another result into this one
    pub fn extend(&mut self, other: CheckResult) {
        for diag in other.diagnostics {
            self.add(diag);
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a single grid block (the text inside the fence)
pub fn check_grid(input: &str) -> CheckResult {
    let mut result = CheckResult::new();
    let (grid, notes) = parse_grid_with_diagnostics(input);

    for note in notes {
        result.add(note);
    }

    check_duplicates(&grid.cells, &mut result);

    for cell in grid.cells.iter().filter(|c| !c.is_canonical()) {
        let canonical = CellAddress::new(cell.row, cell.column).id();
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!("cell {} matches no slot and will not be shown", cell.id),
            )
            .with_suggestion(format!("write the address as {}", canonical)),
        );
    }

    let (rows, columns) = (grid.settings.rows, grid.settings.columns);
    for cell in grid.cells.iter().filter(|c| !c.in_bounds(rows, columns)) {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "cell {} is outside the {}x{} grid and will not be shown",
                    cell.id, columns, rows
                ),
            )
            .with_suggestion(format!(
                "raise columns to {} or rows to {}",
                columns.max(cell.column + 1),
                rows.max(cell.row + 1)
            )),
        );
    }

    if grid.cells.is_empty() {
        result.add(Diagnostic::new(
            DiagnosticLevel::Info,
            "block has no cells; every slot will be empty",
        ));
    }

    result
}

fn check_duplicates(cells: &[GridCell], result: &mut CheckResult) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for cell in cells {
        *counts.entry(cell.id.as_str()).or_default() += 1;
    }

    let mut reported: Vec<&str> = Vec::new();
    for cell in cells {
        let id = cell.id.as_str();
        if counts[id] > 1 && !reported.contains(&id) {
            reported.push(id);
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "cell {} is defined {} times; only the last one is shown",
                        id, counts[id]
                    ),
                )
                .with_suggestion("merge the duplicate cells"),
            );
        }
    }
}

/// Format diagnostics for terminal display
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_block() {
        let result = check_grid(
            "=== start-grid: g1\n\ngrid-settings\ncolumns: 2\nrows: 1\n\n=== cell A1 ===\na\n=== cell B1 ===\nb\n=== end-grid",
        );
        assert!(result.is_empty(), "{}", format_diagnostics(&result, false));
    }

    #[test]
    fn test_unknown_key_warns() {
        let result = check_grid("grid-settings\ncolour: red\n\n=== cell A1 ===\nx");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("colour"));
        assert_eq!(result.diagnostics[0].line, Some(2));
    }

    #[test]
    fn test_malformed_value_warns() {
        let result = check_grid("grid-settings\ncolumns: many\n\n=== cell A1 ===\nx");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("columns"));
    }

    #[test]
    fn test_out_of_range_is_error() {
        let result = check_grid("grid-settings\ncolumns: 3\nrows: 1\n\n=== cell D1 ===\ny");
        assert!(result.has_errors());
        let diag = &result.diagnostics[0];
        assert!(diag.message.contains("D1"));
        assert_eq!(diag.suggestion.as_deref(), Some("raise columns to 4 or rows to 1"));
    }

    #[test]
    fn test_leading_zero_address_is_error() {
        let result = check_grid("=== cell A01 ===\nlost");
        assert!(result.has_errors());
        assert!(result.diagnostics[0].message.contains("A01"));
        assert_eq!(result.diagnostics[0].suggestion.as_deref(), Some("write the address as A1"));
    }

    #[test]
    fn test_oversized_grid_is_defaulted() {
        let result = check_grid("grid-settings\ncolumns: 100000\nrows: 4294967296\n\n=== cell A1 ===\nx");
        assert_eq!(result.warnings, 2);
        assert!(result.diagnostics[0].message.contains("columns"));
        assert!(result.diagnostics[1].message.contains("rows"));
        assert!(!result.has_errors());
    }

    #[test]
    fn test_semicolon_in_track_list_warns() {
        let result = check_grid("grid-settings\ncol-widths: 1fr; position: fixed\n\n=== cell A1 ===\nx");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("col-widths"));
    }

    #[test]
    fn test_duplicate_reported_once() {
        let result = check_grid("=== cell A1 ===\none\n=== cell A1 ===\ntwo\n=== cell A1 ===\nthree");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("3 times"));
    }

    #[test]
    fn test_empty_block_is_info() {
        let result = check_grid("");
        assert!(!result.has_errors());
        assert_eq!(result.infos, 1);
    }

    #[test]
    fn test_summary() {
        let mut result = CheckResult::new();
        assert_eq!(result.summary(), "no issues found");
        result.add(Diagnostic::new(DiagnosticLevel::Error, "a"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "b"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "c"));
        assert_eq!(result.summary(), "1 error, 2 warnings");
    }

    #[test]
    fn test_offset_line() {
        let diag = Diagnostic::new(DiagnosticLevel::Info, "x")
            .with_line(2)
            .offset_line(10);
        assert_eq!(diag.line, Some(12));
    }
}
