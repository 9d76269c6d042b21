//! Grid settings and their coercion rules

use crate::data::constants::{SettingKey, MAX_GRID_TRACKS, SETTINGS_MARKER, SETTING_KEYS};
use std::fmt::Write;

/// Outcome of applying one `key: value` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingOutcome {
    /// Value accepted as written
    Applied(SettingKey),
    /// Value was malformed and the default was used
    Defaulted(SettingKey),
    /// Key is not a grid setting
    Unknown,
}

/// Settings for one grid block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSettings {
    pub columns: usize,
    pub rows: usize,
    pub show_borders: bool,
    pub cell_height: Option<String>,
    pub dynamic_height: Option<bool>,
    pub invisible_mode: Option<bool>,
    pub col_widths: Option<String>,
    pub row_heights: Option<String>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            rows: Self::DEFAULT_ROWS,
            show_borders: true,
            cell_height: None,
            dynamic_height: None,
            invisible_mode: None,
            col_widths: None,
            row_heights: None,
        }
    }
}

impl GridSettings {
    pub const DEFAULT_COLUMNS: usize = 2;
    pub const DEFAULT_ROWS: usize = 2;

    /// Settings with the given dimensions and everything else defaulted
    pub fn with_size(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Apply one settings line. Lines without a colon are unknown.
    pub fn apply_line(&mut self, line: &str) -> SettingOutcome {
        match line.split_once(':') {
            Some((key, value)) => self.apply(key.trim(), value.trim()),
            None => SettingOutcome::Unknown,
        }
    }

    /// Apply a trimmed key and value
    pub fn apply(&mut self, key: &str, value: &str) -> SettingOutcome {
        let Some(&setting) = SETTING_KEYS.get(key) else {
            return SettingOutcome::Unknown;
        };

        let accepted = match setting {
            SettingKey::Columns => {
                let parsed = parse_positive(value);
                self.columns = parsed.unwrap_or(Self::DEFAULT_COLUMNS);
                parsed.is_some()
            }
            SettingKey::Rows => {
                let parsed = parse_positive(value);
                self.rows = parsed.unwrap_or(Self::DEFAULT_ROWS);
                parsed.is_some()
            }
            SettingKey::ShowBorders => {
                self.show_borders = value == "true";
                is_bool_literal(value)
            }
            SettingKey::DynamicHeight => {
                self.dynamic_height = Some(value == "true");
                is_bool_literal(value)
            }
            SettingKey::InvisibleMode => {
                self.invisible_mode = Some(value == "true");
                is_bool_literal(value)
            }
            SettingKey::CellHeight => {
                self.cell_height = css_value(value);
                !value.contains(';')
            }
            SettingKey::ColWidths => {
                self.col_widths = css_value(value);
                !value.contains(';')
            }
            SettingKey::RowHeights => {
                self.row_heights = css_value(value);
                !value.contains(';')
            }
        };

        if accepted {
            SettingOutcome::Applied(setting)
        } else {
            SettingOutcome::Defaulted(setting)
        }
    }

    pub fn is_dynamic_height(&self) -> bool {
        self.dynamic_height.unwrap_or(false)
    }

    pub fn is_invisible(&self) -> bool {
        self.invisible_mode.unwrap_or(false)
    }

    /// Total number of slots the layout will create
    pub fn slot_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Serialize back to a settings section (marker line included, no
    /// trailing blank line). Optional fields are written only when set.
    pub fn to_settings_block(&self) -> String {
        let mut out = String::new();
        out.push_str(SETTINGS_MARKER);
        out.push('\n');
        let _ = writeln!(out, "{}: {}", SettingKey::Columns.as_str(), self.columns);
        let _ = writeln!(out, "{}: {}", SettingKey::Rows.as_str(), self.rows);
        let _ = writeln!(
            out,
            "{}: {}",
            SettingKey::ShowBorders.as_str(),
            self.show_borders
        );
        if let Some(ref height) = self.cell_height {
            let _ = writeln!(out, "{}: {}", SettingKey::CellHeight.as_str(), height);
        }
        if let Some(dynamic) = self.dynamic_height {
            let _ = writeln!(out, "{}: {}", SettingKey::DynamicHeight.as_str(), dynamic);
        }
        if let Some(invisible) = self.invisible_mode {
            let _ = writeln!(
                out,
                "{}: {}",
                SettingKey::InvisibleMode.as_str(),
                invisible
            );
        }
        if let Some(ref widths) = self.col_widths {
            let _ = writeln!(out, "{}: {}", SettingKey::ColWidths.as_str(), widths);
        }
        if let Some(ref heights) = self.row_heights {
            let _ = writeln!(out, "{}: {}", SettingKey::RowHeights.as_str(), heights);
        }
        out
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_GRID_TRACKS).contains(n))
}

fn is_bool_literal(value: &str) -> bool {
    value == "true" || value == "false"
}

/// A value for the inline style attribute. A `;` would end the declaration,
/// so such values are rejected.
fn css_value(value: &str) -> Option<String> {
    if value.is_empty() || value.contains(';') {
        None
    } else {
        Some(value.to_string())
    }
}
