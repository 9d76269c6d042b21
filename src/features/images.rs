//! Image handling inside grid cells
//!
//! This module provides:
//! - Post-processing of `<img>` tags in rendered cell HTML (column sizing
//!   class, load-failure marker)
//! - Expansion of `![[file|mods]]` embeds into `<img>` tags for renderers
//!   that only understand CommonMark

use crate::core::image::ImageReference;
use crate::data::constants::{
    CLASS_ATTR, CLASS_EMBED_PREFIX, CLASS_IMG_MISSING, CLASS_IMG_THREE_COLUMNS,
    CLASS_IMG_TWO_COLUMNS, IMAGE_EMBED, IMG_TAG, ONERROR_ATTR, RECOGNIZED_MODIFIERS,
};
use crate::utils::host::resolve_relative;
use regex::Captures;

/// Sizing class for images in a grid with `columns` columns
pub fn image_class_for_columns(columns: usize) -> Option<&'static str> {
    match columns {
        2 => Some(CLASS_IMG_TWO_COLUMNS),
        3 => Some(CLASS_IMG_THREE_COLUMNS),
        _ => None,
    }
}

/// `onerror` handler: hide the image and put a visible marker after it
pub fn missing_image_handler() -> String {
    format!(
        "this.style.display='none';this.insertAdjacentHTML('afterend','&lt;span class=&quot;{}&quot;&gt;Image not found&lt;/span&gt;')",
        CLASS_IMG_MISSING
    )
}

/// Tag every `<img>` in `html` with the column sizing class and the
/// load-failure handler
pub fn post_process_images(html: &str, columns: usize) -> String {
    let class = image_class_for_columns(columns);
    let handler = missing_image_handler();

    IMG_TAG
        .replace_all(html, |caps: &Captures| {
            let mut attrs = caps[1].to_string();
            let close = &caps[2];

            if let Some(class) = class {
                attrs = add_class(&attrs, class);
            }
            if !ONERROR_ATTR.is_match(&attrs) {
                attrs.push_str(&format!(r#" onerror="{}""#, handler));
            }

            format!("<img{}{}>", attrs, close)
        })
        .into_owned()
}

/// Add a class to an attribute string, creating the attribute if needed
fn add_class(attrs: &str, class: &str) -> String {
    if let Some(caps) = CLASS_ATTR.captures(attrs) {
        let existing = &caps[1];
        if existing.split_whitespace().any(|c| c == class) {
            return attrs.to_string();
        }
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let merged = if existing.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {}", existing.trim(), class)
        };
        format!(
            r#"{}class="{}"{}"#,
            &attrs[..whole.start],
            merged,
            &attrs[whole.end..]
        )
    } else {
        format!(r#" class="{}"{}"#, class, attrs)
    }
}

/// Replace `![[file|mods]]` embeds with `<img>` tags
pub fn expand_embeds(markdown: &str, source_path: &str) -> String {
    IMAGE_EMBED
        .replace_all(markdown, |caps: &Captures| {
            embed_to_img_tag(&caps[1], source_path)
        })
        .into_owned()
}

/// Build the `<img>` tag for the text between `![[` and `]]`
///
/// The `src` is resolved against the directory of `source_path`. Recognised
/// modifiers become `grid-embed-<mod>` classes; the rest are kept in a
/// `data-modifiers` attribute.
pub fn embed_to_img_tag(inner: &str, source_path: &str) -> String {
    let reference = ImageReference::parse(inner);
    let src = resolve_relative(source_path, &reference.filename);

    let mut classes = Vec::new();
    let mut other = Vec::new();
    for modifier in &reference.modifiers {
        let modifier = modifier.trim();
        if RECOGNIZED_MODIFIERS.contains(modifier) {
            classes.push(format!("{}{}", CLASS_EMBED_PREFIX, modifier));
        } else if !modifier.is_empty() {
            other.push(modifier);
        }
    }

    let mut tag = format!(
        r#"<img src="{}" alt="{}""#,
        escape_attr(&src),
        escape_attr(&reference.filename)
    );
    if !classes.is_empty() {
        tag.push_str(&format!(r#" class="{}""#, classes.join(" ")));
    }
    if !other.is_empty() {
        tag.push_str(&format!(
            r#" data-modifiers="{}""#,
            escape_attr(&other.join("|"))
        ));
    }
    tag.push_str(" />");
    tag
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
