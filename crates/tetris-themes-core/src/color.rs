//! Channel quantization and byte packing.
//!
//! The display stores one color per byte as `0b11RRGGBB`: two bits per
//! channel, with the top two bits always set. On the watch those top bits
//! are the alpha channel of an ARGB2222 color, so every packed color is
//! fully opaque.

use std::fmt;

/// Bits forced on in every encoded byte.
pub const FORMAT_TAG: u8 = 0xC0;

/// Highest value a channel quantizes to.
pub const MAX_QUANTIZED: u8 = 3;

/// Map an 8-bit channel (0-255) to a 2-bit value (0-3).
///
/// Computes `c * 3 / 255` rounded half-up. The integer form
/// `(6c + 255) / 510` is exact for every `u8` and matches truncating
/// `c * 3 / 255 + 0.5` toward zero.
///
/// | input      | output |
/// |------------|--------|
/// | `0..=42`   | 0      |
/// | `43..=127` | 1      |
/// | `128..=212`| 2      |
/// | `213..=255`| 3      |
pub fn quantize_channel(c: u8) -> u8 {
    let c = u32::from(c);
    // max (6 * 255 + 255) / 510 == 3, always fits
    ((6 * c + 255) / 510) as u8
}

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel reduced to 2 bits, as `(r2, g2, b2)`.
    pub fn quantized(self) -> (u8, u8, u8) {
        (
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
        )
    }

    /// Pack into a single display byte: `(r2 << 4) | (g2 << 2) | b2 | 0xC0`.
    pub fn encode(self) -> u8 {
        let (r2, g2, b2) = self.quantized();
        (r2 << 4) | (g2 << 2) | b2 | FORMAT_TAG
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.r, self.g, self.b)
    }
}

/// Encode colors in order, one byte each.
pub fn encode_colors<I>(colors: I) -> Vec<u8>
where
    I: IntoIterator<Item = Color>,
{
    colors.into_iter().map(Color::encode).collect()
}
