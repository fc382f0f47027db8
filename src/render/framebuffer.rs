//! Colour and depth grids for one frame.
//!
//! The depth buffer stores view-space z for each pixel. Smaller z is nearer
//! the viewer, and `+inf` means nothing has been drawn there yet. A pixel is
//! only replaced by a strictly nearer sample, so on an exact tie the polygon
//! drawn first keeps the pixel.

use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};

use crate::colors::Color;

/// Owned colour + depth buffers of `width * height` pixels, stored row-major
/// and addressed by `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    color_buffer: Vec<Color>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Creates a framebuffer filled with `background` at infinite depth.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            color_buffer: vec![background; size],
            depth_buffer: vec![f32::INFINITY; size],
            width,
            height,
        }
    }

    /// Resets every pixel to `background` and every depth to `+inf`.
    pub fn clear(&mut self, background: Color) {
        self.color_buffer.fill(background);
        self.depth_buffer.fill(f32::INFINITY);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth_buffer[i])
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// Writes `depth` and `color` only if `depth` is strictly less than the
    /// stored depth. Out-of-bounds coordinates are ignored. Returns whether
    /// the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.color_buffer
    }

    /// The frame as ARGB8888 bytes in native order, ready for a streaming
    /// texture upload (pitch = `width * 4`).
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|c| c.to_argb().to_ne_bytes())
            .collect()
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.color_buffer[y as usize * self.width as usize + x as usize];
            Rgb(c.channels())
        })
    }

    /// Writes the frame to `path`; the format follows the file extension.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_rgb_image().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BACKGROUND, BLACK, WHITE};

    #[test]
    fn test_new_is_background_at_infinite_depth() {
        let fb = FrameBuffer::new(4, 3, BACKGROUND);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&c| c == BACKGROUND));
        assert_eq!(fb.depth_at(3, 2), Some(f32::INFINITY));
        assert_eq!(fb.depth_at(4, 0), None);
        assert_eq!(fb.color_at(0, -1), None);
    }

    #[test]
    fn test_depth_test_is_strict() {
        let mut fb = FrameBuffer::new(2, 2, BACKGROUND);
        assert!(fb.set_pixel_with_depth(1, 1, 5.0, WHITE));
        assert!(!fb.set_pixel_with_depth(1, 1, 5.0, BLACK));
        assert_eq!(fb.color_at(1, 1), Some(WHITE));
        assert!(fb.set_pixel_with_depth(1, 1, 4.0, BLACK));
        assert_eq!(fb.color_at(1, 1), Some(BLACK));
        assert_eq!(fb.depth_at(1, 1), Some(4.0));
        assert!(!fb.set_pixel_with_depth(1, 1, 9.0, WHITE));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2, BACKGROUND);
        assert!(!fb.set_pixel_with_depth(-1, 0, 0.0, WHITE));
        assert!(!fb.set_pixel_with_depth(0, 2, 0.0, WHITE));
        assert!(fb.pixels().iter().all(|&c| c == BACKGROUND));
    }

    #[test]
    fn test_clear_resets_depth() {
        let mut fb = FrameBuffer::new(2, 1, BACKGROUND);
        fb.set_pixel_with_depth(0, 0, 1.0, WHITE);
        fb.clear(BLACK);
        assert_eq!(fb.color_at(0, 0), Some(BLACK));
        assert_eq!(fb.depth_at(0, 0), Some(f32::INFINITY));
    }

    #[test]
    fn test_conversions_keep_row_major_order() {
        let mut fb = FrameBuffer::new(3, 2, BLACK);
        let red = Color::new(255, 0, 0);
        fb.set_pixel_with_depth(2, 1, 0.0, red);

        let image = fb.to_rgb_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));

        let bytes = fb.to_argb_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 4);
        let last = u32::from_ne_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!(last, 0xFFFF_0000);
    }
}
