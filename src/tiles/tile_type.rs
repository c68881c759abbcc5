//! Tile type descriptors - static display data per value.
//!
//! A `TileType` holds what a presenter needs to draw a tile of a given
//! value. The engine only ever looks descriptors up by value.

use serde::{Deserialize, Serialize};

/// Smallest value a tile can carry.
pub const MIN_TILE_VALUE: u32 = 2;

/// Check that `value` is a legal tile value (a power of two, at least 2).
///
/// ```
/// use rust_2048::tiles::is_tile_value;
///
/// assert!(is_tile_value(2));
/// assert!(is_tile_value(2048));
/// assert!(!is_tile_value(1));
/// assert!(!is_tile_value(6));
/// ```
#[must_use]
pub const fn is_tile_value(value: u32) -> bool {
    value >= MIN_TILE_VALUE && value.is_power_of_two()
}

/// RGB display color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Color {
    /// Create a color from components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// Classic palette, indexed by log2(value) - 1. Values past the end share
// the last entry.
const CLASSIC_COLORS: [u32; 12] = [
    0xeee4da, 0xede0c8, 0xf2b179, 0xf59563, 0xf67c5f, 0xf65e3b,
    0xedcf72, 0xedcc61, 0xedc850, 0xedc53f, 0xedc22e, 0x3c3a32,
];

/// Static descriptor for one tile value.
///
/// ## Example
///
/// ```
/// use rust_2048::tiles::{Color, TileType};
///
/// let eight = TileType::new(8, Color::hex(0xf2b179));
/// assert_eq!(eight.name, "8");
/// assert_eq!(eight.color.to_string(), "#f2b179");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    /// Value this descriptor applies to.
    pub value: u32,

    /// Label to display.
    pub name: String,

    /// Background color.
    pub color: Color,
}

impl TileType {
    /// Create a descriptor labelled with its value.
    #[must_use]
    pub fn new(value: u32, color: Color) -> Self {
        Self {
            value,
            name: value.to_string(),
            color,
        }
    }

    /// Override the display label (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Descriptors for every power of two from 2 through `max_value`.
    ///
    /// Always covers at least 2 and 4, the spawnable values.
    #[must_use]
    pub fn classic_palette(max_value: u32) -> Vec<TileType> {
        let max_value = max_value.max(4);
        let mut types = Vec::new();
        let mut value = MIN_TILE_VALUE;
        let mut index = 0;

        while value <= max_value {
            let packed = CLASSIC_COLORS[index.min(CLASSIC_COLORS.len() - 1)];
            types.push(TileType::new(value, Color::hex(packed)));

            match value.checked_mul(2) {
                Some(next) => value = next,
                None => break,
            }
            index += 1;
        }

        types
    }
}
