//! RGBA color used for framebuffer clears

use serde::{Deserialize, Serialize};

/// Linear RGBA color with one `f32` per channel
///
/// Colors handed to a window must be normalized: every channel finite and
/// within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from four channels
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Channels as an array `[r, g, b, a]`
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether every channel is finite and within `[0, 1]`
    pub fn is_normalized(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_opaque_black() {
        let color = Color::default();
        assert_relative_eq!(color.a, 1.0);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_normalized_range() {
        assert!(Color::rgba(0.0, 0.5, 1.0, 1.0).is_normalized());
        assert!(Color::TRANSPARENT.is_normalized());
        assert!(!Color::rgba(1.01, 0.0, 0.0, 1.0).is_normalized());
        assert!(!Color::rgba(0.0, -0.1, 0.0, 1.0).is_normalized());
        assert!(!Color::rgba(0.0, 0.0, f32::NAN, 1.0).is_normalized());
        assert!(!Color::rgba(0.0, 0.0, 0.0, f32::INFINITY).is_normalized());
    }

    #[test]
    fn test_array_conversion() {
        let color: Color = [0.25, 0.5, 0.75, 1.0].into();
        let back: [f32; 4] = color.into();
        assert_relative_eq!(back[0], 0.25);
        assert_relative_eq!(back[2], 0.75);
    }
}
