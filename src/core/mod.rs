//! Core modules
//!
//! This module contains the two features and their shared configuration:
//! - `grid`: grid block parser, layout builder and content injector
//! - `image`: embedded-image locator and modifier rewriter
//! - `context`: render options and application display state

pub mod context;
pub mod grid;
pub mod image;

pub use context::{RenderContext, RenderOptions};

pub use grid::{
    build_layout, inject_content, parse_grid, render_block, render_block_html, GridCell,
    GridLayout, GridSettings, ParsedGrid, Slot, SlotContent,
};

pub use image::{
    apply_image_action, locate_image, rewrite_modifiers, ImageAction, ImageMatch,
    ImageReference, ModifierKeywords,
};
