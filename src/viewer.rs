//! Interactive camera state.
//!
//! The window layer turns keys and mouse drags into [`ViewCommand`]s; the
//! accumulated [`ViewState`] becomes the [`FrameInput`] of the next frame.

use crate::colors::Color;
use crate::config::ViewerConfig;
use crate::math::vec3::Vec3;

/// Everything a frame needs from the viewer besides the scene itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Accumulated rotation about the X axis (radians).
    pub rotation_x: f32,
    /// Accumulated rotation about the Y axis (radians).
    pub rotation_y: f32,
    /// Accumulated zoom factor, already clamped.
    pub zoom: f32,
    /// Accumulated viewer translation in canvas pixels.
    pub pan: Vec3,
    pub ambient: Color,
    pub light: Color,
}

impl Default for FrameInput {
    fn default() -> Self {
        let config = ViewerConfig::default();
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            zoom: 1.0,
            pan: Vec3::ZERO,
            ambient: config.ambient,
            light: config.light,
        }
    }
}

/// What a mouse drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    /// Mouse drag by `(dx, dy)` pixels, interpreted by the current [`DragMode`].
    Drag { dx: f32, dy: f32 },
    ToggleDragMode,
    /// Back to the initial framing. Lights are left alone.
    Reset,
    /// Adds to every ambient channel.
    AdjustAmbient(i16),
    /// Adds to every direct light channel.
    AdjustLight(i16),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub zoom: f32,
    pub pan: Vec3,
    pub drag_mode: DragMode,
    pub ambient: Color,
    pub light: Color,
}

impl ViewState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            zoom: config.clamp_zoom(1.0),
            pan: Vec3::ZERO,
            drag_mode: DragMode::default(),
            ambient: config.ambient,
            light: config.light,
        }
    }

    /// Resets the camera, keeping drag mode and lights.
    pub fn reset_camera(&mut self, config: &ViewerConfig) {
        self.rotation_x = 0.0;
        self.rotation_y = 0.0;
        self.zoom = config.clamp_zoom(1.0);
        self.pan = Vec3::ZERO;
    }

    pub fn apply(&mut self, command: ViewCommand, config: &ViewerConfig) {
        let step = config.rotate_step;
        let pan = config.pan_step;
        match command {
            ViewCommand::RotateLeft => self.rotation_y += step,
            ViewCommand::RotateRight => self.rotation_y -= step,
            ViewCommand::RotateUp => self.rotation_x -= step,
            ViewCommand::RotateDown => self.rotation_x += step,
            ViewCommand::PanUp => self.pan.y -= pan,
            ViewCommand::PanDown => self.pan.y += pan,
            ViewCommand::PanLeft => self.pan.x -= pan,
            ViewCommand::PanRight => self.pan.x += pan,
            ViewCommand::ZoomIn => self.zoom = config.clamp_zoom(self.zoom * config.zoom_in_factor),
            ViewCommand::ZoomOut => {
                self.zoom = config.clamp_zoom(self.zoom * config.zoom_out_factor)
            }
            ViewCommand::Drag { dx, dy } => match self.drag_mode {
                DragMode::Rotate => {
                    self.rotation_y -= dx / config.drag_sensitivity;
                    self.rotation_x += dy / config.drag_sensitivity;
                }
                DragMode::Pan => self.pan = self.pan + Vec3::new(dx, dy, 0.0),
            },
            ViewCommand::ToggleDragMode => {
                self.drag_mode = match self.drag_mode {
                    DragMode::Rotate => DragMode::Pan,
                    DragMode::Pan => DragMode::Rotate,
                }
            }
            ViewCommand::Reset => self.reset_camera(config),
            ViewCommand::AdjustAmbient(delta) => self.ambient = self.ambient.brighten(delta),
            ViewCommand::AdjustLight(delta) => self.light = self.light.brighten(delta),
        }
    }

    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            rotation_x: self.rotation_x,
            rotation_y: self.rotation_y,
            zoom: self.zoom,
            pan: self.pan,
            ambient: self.ambient,
            light: self.light,
        }
    }
}
