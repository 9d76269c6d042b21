//! Feature modules
//!
//! Everything around the core grid and image operations:
//! - Whole-document rendering
//! - Image post-processing and embed expansion
//! - The default pulldown-cmark renderer
//! - Block templates

pub mod document;
pub mod images;
pub mod markdown;
pub mod templates;

pub use document::{check_document, extract_grid_blocks, render_document, GridBlock};
pub use markdown::PulldownRenderer;
pub use templates::{generate_grid_id, grid_template};
