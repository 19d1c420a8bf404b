//! Color types shared between the palette table and material resolution

use serde::Serialize;

/// 8-bit per channel color, as stored in source data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RGB8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Normalized color, every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RGB32F {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RGB32F {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Attaches an alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> RGBA32F {
        RGBA32F {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Compares two colors channel by channel, with the given tolerance.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        (self.r - other.r).abs() <= max_abs_diff
            && (self.g - other.g).abs() <= max_abs_diff
            && (self.b - other.b).abs() <= max_abs_diff
    }
}

/// Normalizes every channel by dividing it by 255.
///
/// ## Example
/// ```
/// use rbxmap_utils::color::{RGB32F, RGB8};
/// let white: RGB32F = RGB8::new(255, 255, 255).into();
/// assert_eq!(white, RGB32F::new(1.0, 1.0, 1.0));
/// ```
impl From<RGB8> for RGB32F {
    #[inline]
    fn from(value: RGB8) -> Self {
        Self {
            r: value.r as f32 / 255.0,
            g: value.g as f32 / 255.0,
            b: value.b as f32 / 255.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RGBA32F {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_colors_normalize_per_channel() {
        let color: RGB32F = RGB8::new(27, 42, 53).into();
        assert!(color.abs_diff_eq(&RGB32F::new(27.0 / 255.0, 42.0 / 255.0, 53.0 / 255.0), 1e-6));

        let green = RGB32F::from(RGB8::new(0, 255, 0)).with_alpha(0.25);
        assert_eq!(green, RGBA32F { r: 0.0, g: 1.0, b: 0.0, a: 0.25 });
    }
}
