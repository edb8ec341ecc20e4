//! 24-bit RGB colors and the fixed named-color table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

/// Named colors, sorted by name.
///
/// The order matters: nearest-name suggestions break edit-distance ties by
/// taking the first name in this table.
pub const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::from_rgb(0x000000)),
    ("blue", Color::from_rgb(0x0000FF)),
    ("cyan", Color::from_rgb(0x00FFFF)),
    ("dark_cyan", Color::from_rgb(0x008B8B)),
    ("dark_green", Color::from_rgb(0x006400)),
    ("dark_magenta", Color::from_rgb(0x8B008B)),
    ("gray", Color::from_rgb(0x808080)),
    ("green", Color::from_rgb(0x008000)),
    ("lime", Color::from_rgb(0x00FF00)),
    ("magenta", Color::from_rgb(0xFF00FF)),
    ("navy", Color::from_rgb(0x000080)),
    ("pink", Color::from_rgb(0xFF00AA)),
    ("purple", Color::from_rgb(0xAA00FF)),
    ("red", Color::from_rgb(0xFF0000)),
    ("white", Color::from_rgb(0xFFFFFF)),
    ("yellow", Color::from_rgb(0xFFFF00)),
];

impl Color {
    /// Build from separate components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; bits above 24 are ignored.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Case-insensitive lookup in [`NAMED_COLORS`].
    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.rgb())
    }
}
