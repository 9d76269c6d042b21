//! Data layer - Static keywords and constants
//!
//! This module contains the fixed vocabulary of grid blocks and image
//! embeds:
//! - Markers, settings keys and modifier keywords
//! - Generated class names and the stylesheet that styles them

pub mod constants;
pub mod styles;

// Re-export commonly used items
pub use constants::{SettingKey, POSITION_KEYWORDS, SETTING_KEYS, SIZE_KEYWORDS};
pub use styles::STYLESHEET;
