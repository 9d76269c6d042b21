//! Markers, keywords and class names shared by the grid renderer and the
//! image modifier
//!
//! - Block markers and the settings-key table
//! - Recognised image modifier keywords
//! - CSS class and custom property names emitted by the layout builder

use lazy_static::lazy_static;
use phf::{phf_map, phf_set};
use regex::Regex;

// ============================================================================
// Block Markers
// ============================================================================

/// Prefix of the opening sentinel line (`=== start-grid: <id>`)
pub const START_MARKER_PREFIX: &str = "=== start-grid";

/// Closing sentinel line
pub const END_MARKER: &str = "=== end-grid";

/// Line that opens the settings section
pub const SETTINGS_MARKER: &str = "grid-settings";

/// Info string of the fenced code blocks that carry grid markup
pub const DEFAULT_FENCE_LANGUAGE: &str = "grid";

/// Fixed track height used when neither `cell-height` nor dynamic height is set
pub const DEFAULT_CELL_HEIGHT: &str = "200px";

/// Sentinel value that removes a modifier category instead of setting it
pub const CLEAR_KEYWORD: &str = "clear";

/// Upper bound for `columns` and `rows`; larger values fall back to the
/// default
pub const MAX_GRID_TRACKS: usize = 256;

lazy_static! {
    /// `=== cell A1 ===`, matched against the trimmed line
    pub static ref CELL_MARKER: Regex = Regex::new(r"^=== cell ([A-Z])(\d+) ===$").unwrap();

    /// `![[file]]` or `![[file|mod|mod]]`
    pub static ref IMAGE_EMBED: Regex = Regex::new(r"!\[\[([^\[\]]+)\]\]").unwrap();

    /// Opening `<img ...>` tag in rendered HTML
    pub static ref IMG_TAG: Regex = Regex::new(r"(?i)<img\b([^>]*?)(\s*/?)>").unwrap();

    /// `class="..."` attribute inside a tag
    pub static ref CLASS_ATTR: Regex = Regex::new(r#"\bclass\s*=\s*"([^"]*)""#).unwrap();

    /// `onerror=` attribute name inside a tag (not inside a quoted value)
    pub static ref ONERROR_ATTR: Regex =
        Regex::new(r#"(?i)^(?:[^"']|"[^"]*"|'[^']*')*?\sonerror\s*="#).unwrap();
}

// ============================================================================
// Settings Keys
// ============================================================================

/// Keys understood inside the settings section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Columns,
    Rows,
    ShowBorders,
    CellHeight,
    DynamicHeight,
    InvisibleMode,
    ColWidths,
    RowHeights,
}

impl SettingKey {
    /// Key as written in the block
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Columns => "columns",
            SettingKey::Rows => "rows",
            SettingKey::ShowBorders => "show-borders",
            SettingKey::CellHeight => "cell-height",
            SettingKey::DynamicHeight => "dynamic-height",
            SettingKey::InvisibleMode => "invisible-mode",
            SettingKey::ColWidths => "col-widths",
            SettingKey::RowHeights => "row-heights",
        }
    }
}

pub static SETTING_KEYS: phf::Map<&'static str, SettingKey> = phf_map! {
    "columns" => SettingKey::Columns,
    "rows" => SettingKey::Rows,
    "show-borders" => SettingKey::ShowBorders,
    "cell-height" => SettingKey::CellHeight,
    "dynamic-height" => SettingKey::DynamicHeight,
    "invisible-mode" => SettingKey::InvisibleMode,
    "col-widths" => SettingKey::ColWidths,
    "row-heights" => SettingKey::RowHeights,
};

// ============================================================================
// Image Modifier Keywords
// ============================================================================

/// Position modifiers offered by the context menu, in menu order
pub const POSITION_KEYWORDS: [&str; 5] = ["left", "right", "center", "float-left", "float-right"];

/// Size modifiers offered by the context menu, in menu order
pub const SIZE_KEYWORDS: [&str; 3] = ["small", "medium", "large"];

/// Fast membership test over both default keyword sets
pub static RECOGNIZED_MODIFIERS: phf::Set<&'static str> = phf_set! {
    "left", "right", "center", "float-left", "float-right",
    "small", "medium", "large",
};

// ============================================================================
// Emitted Class Names
// ============================================================================

pub const CLASS_CONTAINER: &str = "grid-container";
pub const CLASS_NO_BORDERS: &str = "grid-no-borders";
pub const CLASS_DYNAMIC_HEIGHT: &str = "grid-dynamic-height";
pub const CLASS_INVISIBLE: &str = "grid-invisible";
pub const CLASS_CELL: &str = "grid-cell";
pub const CLASS_PLACEHOLDER: &str = "grid-cell-empty";
pub const CLASS_IMG_TWO_COLUMNS: &str = "grid-img-2col";
pub const CLASS_IMG_THREE_COLUMNS: &str = "grid-img-3col";
pub const CLASS_IMG_MISSING: &str = "grid-img-missing";
pub const CLASS_EMBED_PREFIX: &str = "grid-embed-";

pub const PROP_COLUMNS: &str = "--grid-columns";
pub const PROP_ROWS: &str = "--grid-rows";
pub const PROP_CELL_HEIGHT: &str = "--grid-cell-height";

/// Column-count class, e.g. `grid-cols-3`
pub fn columns_class(columns: usize) -> String {
    format!("grid-cols-{}", columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_keys_round_trip_names() {
        for (name, key) in SETTING_KEYS.entries() {
            assert_eq!(*name, key.as_str());
        }
    }

    #[test]
    fn test_recognized_modifiers_cover_keyword_lists() {
        for kw in POSITION_KEYWORDS.iter().chain(SIZE_KEYWORDS.iter()) {
            assert!(RECOGNIZED_MODIFIERS.contains(kw));
        }
        assert_eq!(
            RECOGNIZED_MODIFIERS.len(),
            POSITION_KEYWORDS.len() + SIZE_KEYWORDS.len()
        );
    }

    #[test]
    fn test_cell_marker_pattern() {
        assert!(CELL_MARKER.is_match("=== cell A1 ==="));
        assert!(CELL_MARKER.is_match("=== cell Z42 ==="));
        assert!(!CELL_MARKER.is_match("=== cell a1 ==="));
        assert!(!CELL_MARKER.is_match("=== cell AB1 ==="));
        assert!(!CELL_MARKER.is_match("=== cell A ==="));
        assert!(!CELL_MARKER.is_match("===cell A1==="));
    }

    #[test]
    fn test_image_embed_pattern() {
        let caps = IMAGE_EMBED.captures("see ![[pic.png|left]] here").unwrap();
        assert_eq!(&caps[1], "pic.png|left");
        assert!(!IMAGE_EMBED.is_match("[[note]]"));
    }
}
