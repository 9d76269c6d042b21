//! Image modifier
//!
//! Embedded images use the `![[file|mod|mod]]` syntax. A context action on an
//! image near the cursor rewrites its position and size modifiers in place:
//!
//! - `locator`: find the embed within two lines of the cursor
//! - `rewriter`: replace the recognised modifiers and rebuild the line
//!
//! ## Example
//!
//! ```rust
//! use gridmark::core::image::{apply_image_action, ImageAction, ModifierKeywords};
//! use gridmark::utils::host::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new("intro\n![[pic.png|left|small]]\n");
//! let action = ImageAction::Position("right".to_string());
//! apply_image_action(&mut doc, 0, &action, &ModifierKeywords::default()).unwrap();
//! assert_eq!(doc.text(), "intro\n![[pic.png|right|small]]\n");
//! ```

pub mod locator;
pub mod rewriter;

pub use locator::{locate_image, ImageMatch, SEARCH_RADIUS};
pub use rewriter::rewrite_modifiers;

use crate::data::constants::{CLEAR_KEYWORD, POSITION_KEYWORDS, SIZE_KEYWORDS};
use crate::utils::error::{GridError, GridResult};
use crate::utils::host::LineEditor;
use indexmap::IndexSet;
use std::fmt;
use tracing::debug;

/// Filename plus modifiers of one embed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageReference {
    pub filename: String,
    /// Everything after the first `|`, in order
    pub modifiers: Vec<String>,
}

impl ImageReference {
    /// Parse the text between `![[` and `]]`
    pub fn parse(inner: &str) -> Self {
        let mut parts = inner.split('|');
        let filename = parts.next().unwrap_or_default().to_string();
        ImageReference {
            filename,
            modifiers: parts.map(str::to_string).collect(),
        }
    }

    /// Serialize back to `![[...]]`, with no trailing pipe when there are no
    /// modifiers
    pub fn to_embed(&self) -> String {
        if self.modifiers.is_empty() {
            format!("![[{}]]", self.filename)
        } else {
            format!("![[{}|{}]]", self.filename, self.modifiers.join("|"))
        }
    }
}

/// The recognised position and size keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierKeywords {
    positions: IndexSet<String>,
    sizes: IndexSet<String>,
}

impl Default for ModifierKeywords {
    fn default() -> Self {
        Self::new(POSITION_KEYWORDS, SIZE_KEYWORDS)
    }
}

impl ModifierKeywords {
    pub fn new<P, S>(positions: P, sizes: S) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            positions: positions.into_iter().map(Into::into).collect(),
            sizes: sizes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_position(&self, token: &str) -> bool {
        self.positions.contains(token)
    }

    pub fn is_size(&self, token: &str) -> bool {
        self.sizes.contains(token)
    }

    pub fn is_recognized(&self, token: &str) -> bool {
        self.is_position(token) || self.is_size(token)
    }

    /// Positions in menu order
    pub fn positions(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(String::as_str)
    }

    /// Sizes in menu order
    pub fn sizes(&self) -> impl Iterator<Item = &str> {
        self.sizes.iter().map(String::as_str)
    }
}

/// A context-menu action on an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAction {
    Position(String),
    Size(String),
    /// Remove every recognised position and size modifier
    Clear,
}

impl ImageAction {
    /// Every action the context menu offers, positions first
    pub fn menu_entries(keywords: &ModifierKeywords) -> Vec<ImageAction> {
        keywords
            .positions()
            .map(|p| ImageAction::Position(p.to_string()))
            .chain(keywords.sizes().map(|s| ImageAction::Size(s.to_string())))
            .chain(std::iter::once(ImageAction::Clear))
            .collect()
    }

    /// Position and size arguments for [`rewrite_modifiers`]
    fn changes(&self) -> (Option<&str>, Option<&str>) {
        match self {
            ImageAction::Position(p) => (Some(p.as_str()), None),
            ImageAction::Size(s) => (None, Some(s.as_str())),
            ImageAction::Clear => (Some(CLEAR_KEYWORD), Some(CLEAR_KEYWORD)),
        }
    }
}

impl fmt::Display for ImageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageAction::Position(p) => write!(f, "Position: {}", p),
            ImageAction::Size(s) => write!(f, "Size: {}", s),
            ImageAction::Clear => write!(f, "Clear position and size"),
        }
    }
}

/// Locate the embed near `cursor_line`, rewrite it and write the line back
///
/// Returns the match that was rewritten, or `GridError::ImageNotFound` when
/// no embed lies within the search window.
pub fn apply_image_action(
    editor: &mut dyn LineEditor,
    cursor_line: usize,
    action: &ImageAction,
    keywords: &ModifierKeywords,
) -> GridResult<ImageMatch> {
    let found = locate_image(editor, cursor_line).ok_or(GridError::ImageNotFound {
        line: cursor_line,
    })?;

    let (position, size) = action.changes();
    let updated = rewrite_modifiers(&found, position, size, keywords);
    debug!(line = found.line, action = %action, "rewriting image modifiers");
    editor.set_line(found.line, &updated)?;

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::host::MemoryDocument;

    #[test]
    fn test_reference_parse() {
        let r = ImageReference::parse("pic.png|left|caption=foo");
        assert_eq!(r.filename, "pic.png");
        assert_eq!(r.modifiers, vec!["left", "caption=foo"]);
        assert_eq!(r.to_embed(), "![[pic.png|left|caption=foo]]");

        let plain = ImageReference::parse("pic.png");
        assert!(plain.modifiers.is_empty());
        assert_eq!(plain.to_embed(), "![[pic.png]]");
    }

    #[test]
    fn test_default_keywords() {
        let k = ModifierKeywords::default();
        assert!(k.is_position("float-right"));
        assert!(k.is_size("medium"));
        assert!(!k.is_recognized("caption=foo"));
        assert_eq!(
            k.positions().collect::<Vec<_>>(),
            ["left", "right", "center", "float-left", "float-right"]
        );
    }

    #[test]
    fn test_menu_entries() {
        let entries = ImageAction::menu_entries(&ModifierKeywords::default());
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0], ImageAction::Position("left".to_string()));
        assert_eq!(entries[5], ImageAction::Size("small".to_string()));
        assert_eq!(entries[8], ImageAction::Clear);
    }

    #[test]
    fn test_apply_action_writes_line() {
        let mut doc = MemoryDocument::new("a\nb\n![[pic.png|left|medium]]\nc");
        let found = apply_image_action(
            &mut doc,
            1,
            &ImageAction::Clear,
            &ModifierKeywords::default(),
        )
        .unwrap();
        assert_eq!(found.line, 2);
        assert_eq!(doc.line(2), Some("![[pic.png]]"));
    }

    #[test]
    fn test_apply_action_not_found() {
        let mut doc = MemoryDocument::new("![[pic.png]]\n\n\n\nhere");
        let err = apply_image_action(
            &mut doc,
            4,
            &ImageAction::Size("small".to_string()),
            &ModifierKeywords::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::ImageNotFound { line: 4 }));
        assert_eq!(doc.line(0), Some("![[pic.png]]"));
    }
}
