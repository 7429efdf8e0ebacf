//! Module implementing the `Color` type.

use std::fmt;

use image::Rgba;


/// RGB color of the stamp's text or background.
///
/// Its textual form is the uppercase `#RRGGBB` hex notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Create a white color.
    #[inline]
    pub fn white() -> Self {
        Self::gray(0xff)
    }

    /// Create a black color.
    #[inline]
    pub fn black() -> Self {
        Self::gray(0x00)
    }

    /// Create a gray color of given intensity.
    #[inline]
    pub fn gray(value: u8) -> Self {
        Color(value, value, value)
    }
}

impl Color {
    /// The six hex digits of the color, without the leading `#`.
    pub fn hex_digits(&self) -> String {
        let &Color(r, g, b) = self;
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Linearly interpolate between this color and another one.
    /// `t` is clamped to the [0, 1] range.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = if t.is_finite() { t.max(0.0).min(1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            let (a, b) = (a as f32, b as f32);
            (a + (b - a) * t).round().max(0.0).min(255.0) as u8
        };
        let (Color(r1, g1, b1), Color(r2, g2, b2)) = (self, other);
        Color(mix(r1, r2), mix(g1, g2), mix(b1, b2))
    }

    #[inline]
    pub(crate) fn to_rgba(&self, alpha: u8) -> Rgba<u8> {
        let &Color(r, g, b) = self;
        Rgba([r, g, b, alpha])
    }
}

impl From<Color> for Rgba<u8> {
    #[inline]
    fn from(color: Color) -> Rgba<u8> {
        color.to_rgba(0xff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "#{}", self.hex_digits())
    }
}
