//! Line-oriented grid block parser

use super::cell::GridCell;
use super::settings::{GridSettings, SettingOutcome};
use crate::data::constants::{CELL_MARKER, END_MARKER, SETTINGS_MARKER, START_MARKER_PREFIX};
use crate::utils::diagnostics::{Diagnostic, DiagnosticLevel};
use tracing::{debug, trace};

/// Result of parsing one block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGrid {
    pub settings: GridSettings,
    /// Cells in encounter order, duplicates and out-of-range cells included
    pub cells: Vec<GridCell>,
}

impl ParsedGrid {
    /// Look up a cell by id. The last cell with that id wins.
    pub fn cell(&self, id: &str) -> Option<&GridCell> {
        self.cells.iter().rev().find(|c| c.id == id)
    }
}

/// What the scanner is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Outside,
    Settings,
    Cell,
}

/// Single-pass block scanner
///
/// Tracks the settings section and the open cell; lines are fed one at a
/// time and [`GridParser::finish`] closes whatever is still open.
pub struct GridParser {
    settings: GridSettings,
    cells: Vec<GridCell>,
    mode: Mode,
    /// Address of the open cell
    current: Option<(String, usize, usize)>,
    buffer: Vec<String>,
    /// Notes about silently coerced or dropped input
    notes: Vec<Diagnostic>,
    line_no: usize,
}

impl GridParser {
    pub fn new() -> Self {
        GridParser {
            settings: GridSettings::default(),
            cells: Vec::new(),
            mode: Mode::Outside,
            current: None,
            buffer: Vec::new(),
            notes: Vec::new(),
            line_no: 0,
        }
    }

    /// Feed one line (without its terminator)
    pub fn process_line(&mut self, line: &str) {
        self.line_no += 1;
        let trimmed = line.trim();

        if trimmed == SETTINGS_MARKER {
            self.close_cell();
            self.mode = Mode::Settings;
            return;
        }

        if let Some(caps) = CELL_MARKER.captures(trimmed) {
            let id = format!("{}{}", &caps[1], &caps[2]);
            match GridCell::new(&id, String::new()) {
                Some(cell) => {
                    self.close_cell();
                    trace!(cell = %id, line = self.line_no, "open cell");
                    self.current = Some((cell.id, cell.row, cell.column));
                    self.mode = Mode::Cell;
                    return;
                }
                None => {
                    // Row 0 or a row number too large to represent
                    self.note(
                        Diagnostic::new(
                            DiagnosticLevel::Error,
                            format!("cell marker {} does not address a row", id),
                        )
                        .with_source(trimmed)
                        .with_suggestion("row numbers start at 1"),
                    );
                }
            }
        }

        if self.mode == Mode::Settings {
            if trimmed.is_empty() {
                self.mode = Mode::Outside;
                return;
            }
            match self.settings.apply_line(line) {
                SettingOutcome::Applied(_) => {}
                SettingOutcome::Defaulted(key) => self.note(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!("invalid value for {}, using the default", key.as_str()),
                    )
                    .with_source(trimmed),
                ),
                SettingOutcome::Unknown => self.note(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!("unknown setting '{}' ignored", setting_name(trimmed)),
                    )
                    .with_source(trimmed),
                ),
            }
            return;
        }

        if trimmed.starts_with(START_MARKER_PREFIX) || trimmed == END_MARKER {
            return;
        }

        if self.mode == Mode::Cell {
            self.buffer.push(line.to_string());
        } else if !trimmed.is_empty() {
            self.note(
                Diagnostic::new(DiagnosticLevel::Info, "text outside any cell is dropped")
                    .with_source(trimmed),
            );
        }
    }

    /// Close the open cell and return the result with the collected notes
    pub fn finish(mut self) -> (ParsedGrid, Vec<Diagnostic>) {
        self.close_cell();
        debug!(
            columns = self.settings.columns,
            rows = self.settings.rows,
            cells = self.cells.len(),
            "parsed grid block"
        );
        (
            ParsedGrid {
                settings: self.settings,
                cells: self.cells,
            },
            self.notes,
        )
    }

    fn close_cell(&mut self) {
        if let Some((id, row, column)) = self.current.take() {
            let content = self.buffer.join("\n").trim().to_string();
            self.cells.push(GridCell {
                id,
                row,
                column,
                content,
            });
        }
        self.buffer.clear();
        if self.mode == Mode::Cell {
            self.mode = Mode::Outside;
        }
    }

    fn note(&mut self, diag: Diagnostic) {
        self.notes.push(diag.with_line(self.line_no));
    }
}

impl Default for GridParser {
    fn default() -> Self {
        Self::new()
    }
}

fn setting_name(line: &str) -> &str {
    line.split_once(':').map_or(line, |(key, _)| key.trim())
}

/// Parse a grid block into settings and cells
pub fn parse_grid(input: &str) -> ParsedGrid {
    parse_grid_with_diagnostics(input).0
}

/// Parse a grid block, also returning notes on input that was coerced or
/// dropped
pub fn parse_grid_with_diagnostics(input: &str) -> (ParsedGrid, Vec<Diagnostic>) {
    let mut parser = GridParser::new();
    for line in input.lines() {
        parser.process_line(line);
    }
    parser.finish()
}
