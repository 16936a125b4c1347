//! Packed 32-bit ARGB colors.
//!
//! Map layers exchange colors as `0xAARRGGBB` words. Surface colors are always
//! fully opaque; relief shading reuses the alpha byte as an intensity so the
//! overlay can be composited straight on top of the color layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color packed as `0xAARRGGBB`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Fully transparent black (the zero word).
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Build a color from its four channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Build an opaque color from a `0xRRGGBB` word. The top byte is ignored.
    pub const fn opaque(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// Replace the alpha channel.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self(((alpha as u32) << 24) | (self.0 & 0x00FF_FFFF))
    }

    /// Alpha channel (or shading intensity for relief overlays).
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The color without its alpha byte, as `0x00RRGGBB`.
    pub const fn rgb(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// True when the alpha channel is saturated.
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xFF
    }

    /// Channels in RGBA byte order, as image encoders expect them.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Composite `self` on top of `base` ("source over").
    pub fn over(self, base: PackedColor) -> PackedColor {
        let a = self.alpha() as u32;
        if a == 0 {
            return base;
        }
        if a == 0xFF {
            return self;
        }
        let inv = 255 - a;
        let mix = |top: u8, bottom: u8| -> u8 {
            ((top as u32 * a + bottom as u32 * inv + 127) / 255) as u8
        };
        let out_alpha = a + (base.alpha() as u32 * inv + 127) / 255;
        PackedColor::from_argb(
            out_alpha.min(255) as u8,
            mix(self.red(), base.red()),
            mix(self.green(), base.green()),
            mix(self.blue(), base.blue()),
        )
    }
}

impl From<u32> for PackedColor {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<PackedColor> for u32 {
    fn from(value: PackedColor) -> Self {
        value.0
    }
}

impl fmt::Display for PackedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack() {
        let color = PackedColor::from_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.0, 0x1234_5678);
        assert_eq!(color.alpha(), 0x12);
        assert_eq!(color.red(), 0x34);
        assert_eq!(color.green(), 0x56);
        assert_eq!(color.blue(), 0x78);
        assert_eq!(color.rgb(), 0x0034_5678);
    }

    #[test]
    fn opaque_ignores_high_byte() {
        let color = PackedColor::opaque(0x7F11_2233);
        assert_eq!(color.0, 0xFF11_2233);
        assert!(color.is_opaque());
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let color = PackedColor::opaque(0xDDDDDD).with_alpha(0x40);
        assert_eq!(color.0, 0x40DD_DDDD);
    }

    #[test]
    fn over_respects_extremes() {
        let base = PackedColor::opaque(0x336699);
        assert_eq!(PackedColor::TRANSPARENT.over(base), base);
        assert_eq!(PackedColor::WHITE.over(base), PackedColor::WHITE);
    }

    #[test]
    fn over_blends_half_alpha() {
        let base = PackedColor::BLACK;
        let top = PackedColor::opaque(0xFFFFFF).with_alpha(128);
        let out = top.over(base);
        assert!(out.is_opaque());
        assert_eq!(out.red(), 128);
        assert_eq!(out.green(), 128);
        assert_eq!(out.blue(), 128);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(PackedColor::BLACK.to_string(), "#FF000000");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&PackedColor(0xFF00_00FF)).unwrap();
        assert_eq!(json, "4278190335");
    }
}
