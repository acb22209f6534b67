//! Colors - Table Palette

use gpui::{Rgba, rgb};

/// Table color palette
pub struct TableColors;

impl TableColors {
    /// Table surface
    pub fn surface() -> Rgba { rgb(0xffffff) }
    pub fn header_bg() -> Rgba { rgb(0xf9fafb) }
    pub fn row_alt() -> Rgba { rgb(0xf9fafb) }
    pub fn row_hover() -> Rgba { rgb(0xf3f4f6) }
    pub fn border() -> Rgba { rgb(0xe5e7eb) }

    pub fn text_primary() -> Rgba { rgb(0x1f2937) }
    pub fn text_secondary() -> Rgba { rgb(0x6b7280) }
    /// Empty state, loading and disabled controls
    pub fn text_muted() -> Rgba { rgb(0x9ca3af) }

    /// Selected page size option
    pub fn accent() -> Rgba { rgb(0x2cb3b8) }
    pub fn text_on_accent() -> Rgba { rgb(0xffffff) }
}
