//! Cell colors and the fixed drawing palette.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color stored in a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelColor {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const INDIGO: Self = Self::rgb(75, 0, 130);
    pub const VIOLET: Self = Self::rgb(238, 130, 238);
    pub const PASTEL_PINK: Self = Self::rgb(255, 182, 193);
    pub const PASTEL_YELLOW: Self = Self::rgb(255, 255, 204);
    pub const PASTEL_GREEN: Self = Self::rgb(152, 251, 152);
    pub const PASTEL_BLUE: Self = Self::rgb(173, 216, 230);
    pub const PASTEL_PURPLE: Self = Self::rgb(230, 230, 250);
    pub const BROWN: Self = Self::rgb(165, 42, 42);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<Color> for PixelColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<PixelColor> for Color {
    fn from(color: PixelColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Swatches offered in the sidebar, top to bottom.
pub const PALETTE: [PixelColor; 14] = [
    PixelColor::RED,
    PixelColor::ORANGE,
    PixelColor::YELLOW,
    PixelColor::GREEN,
    PixelColor::BLUE,
    PixelColor::INDIGO,
    PixelColor::VIOLET,
    PixelColor::BROWN,
    PixelColor::BLACK,
    PixelColor::PASTEL_PINK,
    PixelColor::PASTEL_YELLOW,
    PixelColor::PASTEL_GREEN,
    PixelColor::PASTEL_BLUE,
    PixelColor::PASTEL_PURPLE,
];

/// Look up a palette entry by swatch index.
pub fn palette_color(index: usize) -> Option<PixelColor> {
    PALETTE.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_order() {
        assert_eq!(PALETTE.len(), 14);
        assert_eq!(PALETTE[0], PixelColor::RED);
        assert_eq!(PALETTE[3], PixelColor::GREEN);
        assert_eq!(PALETTE[13], PixelColor::PASTEL_PURPLE);
    }

    #[test]
    fn test_palette_lookup_out_of_range() {
        assert_eq!(palette_color(8), Some(PixelColor::BLACK));
        assert_eq!(palette_color(PALETTE.len()), None);
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = PixelColor::INDIGO.into();
        assert_eq!(PixelColor::from(color), PixelColor::INDIGO);
    }
}
