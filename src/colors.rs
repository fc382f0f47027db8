//! RGB colours and the ARGB8888 packing used by the display surface.

use std::fmt;

/// An 8-bit-per-channel RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Light grey canvas behind the model.
pub const BACKGROUND: Color = Color::new(200, 200, 200);
/// Default ambient and direct light level (half intensity on every channel).
pub const DEFAULT_LIGHT: Color = Color::new(128, 128, 128);
pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same intensity on all three channels.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Packs into ARGB8888 with full alpha.
    #[inline]
    pub fn to_argb(&self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Adds `delta` to every channel, saturating at 0 and 255.
    pub fn brighten(&self, delta: i16) -> Self {
        let step = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Self::new(step(self.r), step(self.g), step(self.b))
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_argb() {
        assert_eq!(Color::new(0x12, 0x34, 0x56).to_argb(), 0xFF12_3456);
        assert_eq!(BLACK.to_argb(), 0xFF00_0000);
    }

    #[test]
    fn test_brighten_saturates() {
        assert_eq!(Color::new(250, 5, 128).brighten(10), Color::new(255, 15, 138));
        assert_eq!(Color::new(250, 5, 128).brighten(-10), Color::new(240, 0, 118));
    }
}
