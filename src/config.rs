//! Viewer configuration.
//!
//! Defaults reproduce the classic viewer: a 600x600 canvas on a light grey
//! background, half-intensity ambient and direct light, zoom limited to
//! 0.5x..5x.

use crate::colors::{self, Color};
use crate::pipeline::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("zoom limits must be positive and finite, got {min}..{max}")]
    InvalidZoomLimit { min: f32, max: f32 },
    #[error("min zoom {min} is greater than max zoom {max}")]
    ZoomRangeInverted { min: f32, max: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerConfig {
    pub canvas: Canvas,
    pub background: Color,
    /// Initial ambient light colour.
    pub ambient: Color,
    /// Initial direct (directional) light colour.
    pub light: Color,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom multiplier for one zoom-in step.
    pub zoom_in_factor: f32,
    /// Zoom multiplier for one zoom-out step.
    pub zoom_out_factor: f32,
    /// Radians per arrow-key press.
    pub rotate_step: f32,
    /// Pixels per pan key press.
    pub pan_step: f32,
    /// Drag distance in pixels that rotates by one radian.
    pub drag_sensitivity: f32,
    /// Channel change per light-adjust key press.
    pub light_step: i16,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(600, 600),
            background: colors::BACKGROUND,
            ambient: colors::DEFAULT_LIGHT,
            light: colors::DEFAULT_LIGHT,
            min_zoom: 0.5,
            max_zoom: 5.0,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            rotate_step: 0.1,
            pan_step: 2.0,
            drag_sensitivity: 100.0,
            light_step: 8,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0) {
            return Err(ConfigError::InvalidZoomLimit { min, max });
        }
        if min > max {
            return Err(ConfigError::ZoomRangeInverted { min, max });
        }
        Ok(())
    }

    /// Clamps a zoom factor into `[min_zoom, max_zoom]`.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
