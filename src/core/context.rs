//! Rendering options and application display state

use crate::data::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_FENCE_LANGUAGE};

// =============================================================================
// Render Options
// =============================================================================

/// Options for rendering grid blocks and documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Info string that marks a fenced code block as a grid
    /// Default: "grid"
    pub fence_language: String,

    /// Track height used when a block sets neither `cell-height` nor
    /// `dynamic-height`
    /// Default: "200px"
    pub default_cell_height: String,

    /// Turn `![[file|mods]]` embeds into `<img>` tags before markdown
    /// rendering
    /// Default: true
    pub expand_embeds: bool,

    /// Prepend a `<style>` element with the grid stylesheet to rendered
    /// documents
    /// Default: false
    pub include_stylesheet: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fence_language: DEFAULT_FENCE_LANGUAGE.to_string(),
            default_cell_height: DEFAULT_CELL_HEIGHT.to_string(),
            expand_embeds: true,
            include_stylesheet: false,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a self-contained HTML page
    pub fn standalone() -> Self {
        Self {
            include_stylesheet: true,
            ..Self::default()
        }
    }

    /// Plain CommonMark rendering of cell content: embeds are left as text
    pub fn strict() -> Self {
        Self {
            expand_embeds: false,
            ..Self::default()
        }
    }

    /// Use a different fence info string
    pub fn with_fence_language(mut self, language: impl Into<String>) -> Self {
        self.fence_language = language.into();
        self
    }
}

// =============================================================================
// Application Context
// =============================================================================

/// Application-wide display state handed to the layout builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Hide borders and backgrounds on every grid, whatever the block says
    pub invisible_mode: bool,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invisible() -> Self {
        RenderContext {
            invisible_mode: true,
        }
    }

    /// Flip invisible mode, returning the new state
    pub fn toggle_invisible_mode(&mut self) -> bool {
        self.invisible_mode = !self.invisible_mode;
        self.invisible_mode
    }
}
