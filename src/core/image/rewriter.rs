//! Rewriting the modifier list of an embed

use super::locator::ImageMatch;
use super::{ImageReference, ModifierKeywords};
use crate::data::constants::CLEAR_KEYWORD;

/// Which recognised set a change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Position,
    Size,
}

/// Rewrite the matched embed and return the full updated line
///
/// `None` leaves a category untouched. `Some("clear")` removes the
/// category's recognised tokens. Any other value replaces them: it takes the
/// place of the first removed token, or is appended when there was none.
/// Unrecognised modifiers are never touched.
pub fn rewrite_modifiers(
    found: &ImageMatch,
    position: Option<&str>,
    size: Option<&str>,
    keywords: &ModifierKeywords,
) -> String {
    let mut modifiers = found.reference.modifiers.clone();

    if let Some(value) = position {
        apply_change(&mut modifiers, Category::Position, value, keywords);
    }
    if let Some(value) = size {
        apply_change(&mut modifiers, Category::Size, value, keywords);
    }

    let rebuilt = ImageReference {
        filename: found.reference.filename.clone(),
        modifiers,
    }
    .to_embed();

    let line = &found.line_text;
    format!(
        "{}{}{}",
        &line[..found.range.start],
        rebuilt,
        &line[found.range.end..]
    )
}

fn apply_change(
    modifiers: &mut Vec<String>,
    category: Category,
    value: &str,
    keywords: &ModifierKeywords,
) {
    let in_category = |token: &str| match category {
        Category::Position => keywords.is_position(token),
        Category::Size => keywords.is_size(token),
    };

    let first_removed = modifiers.iter().position(|m| in_category(m.trim()));
    modifiers.retain(|m| !in_category(m.trim()));

    let value = value.trim();
    if value == CLEAR_KEYWORD || value.is_empty() {
        return;
    }

    match first_removed {
        Some(index) => modifiers.insert(index.min(modifiers.len()), value.to_string()),
        None => modifiers.push(value.to_string()),
    }
}
