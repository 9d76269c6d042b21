//! Finding the embedded image nearest the cursor

use super::ImageReference;
use crate::data::constants::IMAGE_EMBED;
use crate::utils::host::LineEditor;
use std::ops::Range;
use tracing::trace;

/// Lines scanned above and below the cursor
pub const SEARCH_RADIUS: usize = 2;

/// An embed found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch {
    /// Line index of the match
    pub line: usize,
    /// Full text of that line
    pub line_text: String,
    /// Byte range of the embed within the line
    pub range: Range<usize>,
    /// The matched `![[...]]` text
    pub text: String,
    pub reference: ImageReference,
}

impl ImageMatch {
    pub fn filename(&self) -> &str {
        &self.reference.filename
    }

    pub fn modifiers(&self) -> &[String] {
        &self.reference.modifiers
    }
}

/// First embed in lines `cursor - 2 ..= cursor + 2`, scanning top to bottom
/// and left to right
pub fn locate_image(editor: &dyn LineEditor, cursor_line: usize) -> Option<ImageMatch> {
    let line_count = editor.line_count();
    if line_count == 0 {
        return None;
    }

    let first = cursor_line.saturating_sub(SEARCH_RADIUS);
    let last = cursor_line
        .saturating_add(SEARCH_RADIUS)
        .min(line_count - 1);

    for index in first..=last {
        let Some(line) = editor.line(index) else {
            continue;
        };
        if let Some(caps) = IMAGE_EMBED.captures(line) {
            let whole = caps.get(0)?;
            trace!(line = index, embed = whole.as_str(), "found image embed");
            return Some(ImageMatch {
                line: index,
                line_text: line.to_string(),
                range: whole.range(),
                text: whole.as_str().to_string(),
                reference: ImageReference::parse(&caps[1]),
            });
        }
    }

    None
}
