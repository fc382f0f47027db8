//! The per-frame rendering pipeline.
//!
//! Scene transforms never modify their input; each returns a new [`Scene`].
//! A frame runs, in order:
//!
//! 1. rotate the fitted baseline scene by the accumulated angles
//! 2. scale by the accumulated zoom
//! 3. recenter on the canvas (translation only)
//! 4. translate by the viewer pan
//! 5. per polygon, in scene order: cull, shade, scan-convert, composite
//!
//! The baseline itself comes from [`auto_fit`], run once when a scene is
//! loaded (see [`crate::engine::Engine`]).

use crate::colors::Color;
use crate::render::{composite, plan_faces, scan_convert, FrameBuffer};
use crate::scene::{Bounds, Polygon, Scene};
use crate::transform::Transform;
use crate::viewer::FrameInput;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("cannot fit an empty scene")]
    EmptyScene,
    /// Every extent is zero (or the canvas is too small), so no finite,
    /// positive scale exists.
    #[error("cannot fit a scene with degenerate bounds {min:?}..{max:?}")]
    DegenerateExtent {
        min: crate::math::vec3::Vec3,
        max: crate::math::vec3::Vec3,
    },
}

/// Maps every vertex and the light vector through `transform`.
/// Reflectance and polygon order are kept.
pub fn apply_transform(scene: &Scene, transform: &Transform) -> Scene {
    let polygons = scene
        .polygons()
        .iter()
        .map(|p| Polygon {
            vertices: p.vertices.map(|v| transform.apply(v)),
            reflectance: p.reflectance,
        })
        .collect();
    Scene::new(polygons, transform.apply(scene.light()))
}

/// Rotates geometry and light about Y by `y_angle`, then about X by
/// `x_angle`.
pub fn rotate(scene: &Scene, x_angle: f32, y_angle: f32) -> Scene {
    let transform = Transform::rotation_x(x_angle).compose(&Transform::rotation_y(y_angle));
    apply_transform(scene, &transform)
}

pub fn translate(scene: &Scene, x: f32, y: f32, z: f32) -> Scene {
    apply_transform(scene, &Transform::translation(x, y, z))
}

pub fn scale(scene: &Scene, x: f32, y: f32, z: f32) -> Scene {
    apply_transform(scene, &Transform::scaling(x, y, z))
}

/// Uniform scale that fits `bounds` into half the canvas.
///
/// The candidates are `(width/2) / bounds.width`, `(height/2) / bounds.height`
/// and `(min(width, height)/2) / bounds.depth`, with the halving done in
/// integer pixels. A zero extent puts no limit on the scale.
pub fn fit_scale(bounds: &Bounds, canvas: Canvas) -> Result<f32, FitError> {
    if bounds.is_empty() {
        return Err(FitError::EmptyScene);
    }
    let ratio = |half: u32, extent: f32| {
        if extent > 0.0 {
            half as f32 / extent
        } else {
            f32::INFINITY
        }
    };
    let scale = ratio(canvas.width / 2, bounds.width())
        .min(ratio(canvas.height / 2, bounds.height()))
        .min(ratio(canvas.width.min(canvas.height) / 2, bounds.depth()));

    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(FitError::DegenerateExtent {
            min: bounds.min,
            max: bounds.max,
        })
    }
}

/// Translation that centres a box of the given min corner and size on the
/// canvas in x and y. z is left alone.
fn centering_shift(min_x: f32, min_y: f32, width: f32, height: f32, canvas: Canvas) -> Transform {
    let shift_x = (canvas.width as f32 - width) / 2.0 - min_x;
    let shift_y = (canvas.height as f32 - height) / 2.0 - min_y;
    Transform::translation(shift_x, shift_y, 0.0)
}

/// Scales the scene uniformly by [`fit_scale`], then centres the scaled
/// bounding box on the canvas.
pub fn auto_fit(scene: &Scene, bounds: &Bounds, canvas: Canvas) -> Result<Scene, FitError> {
    let s = fit_scale(bounds, canvas)?;
    log::debug!("auto-fit scale {s} for bounds {:?}..{:?}", bounds.min, bounds.max);

    let shift = centering_shift(
        bounds.min.x * s,
        bounds.min.y * s,
        bounds.width() * s,
        bounds.height() * s,
        canvas,
    );
    Ok(apply_transform(scene, &shift.compose(&Transform::scaling(s, s, s))))
}

/// Centres the scene on the canvas without changing its size.
pub fn recenter(scene: &Scene, bounds: &Bounds, canvas: Canvas) -> Result<Scene, FitError> {
    if bounds.is_empty() {
        return Err(FitError::EmptyScene);
    }
    let shift = centering_shift(
        bounds.min.x,
        bounds.min.y,
        bounds.width(),
        bounds.height(),
        canvas,
    );
    Ok(apply_transform(scene, &shift))
}

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    pub pixels_written: usize,
}

/// A finished frame and what went into it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFrame {
    pub framebuffer: FrameBuffer,
    pub stats: FrameStats,
}

/// Renders one frame of `baseline` as seen through `input`.
///
/// `baseline` should already be fitted to the canvas with [`auto_fit`].
pub fn render_frame(
    baseline: &Scene,
    input: &FrameInput,
    canvas: Canvas,
    background: Color,
) -> Result<RenderedFrame, FitError> {
    let mut framebuffer = FrameBuffer::new(canvas.width, canvas.height, background);

    let rotated = rotate(baseline, input.rotation_x, input.rotation_y);
    let scaled = scale(&rotated, input.zoom, input.zoom, input.zoom);
    let centered = recenter(&scaled, &scaled.bounds(), canvas)?;
    let placed = translate(&centered, input.pan.x, input.pan.y, input.pan.z);

    let mut stats = FrameStats::default();
    for plan in plan_faces(&placed, input.light, input.ambient) {
        match plan.color {
            Some(color) if plan.visible => {
                let edges = scan_convert(&placed.polygons()[plan.index]);
                stats.pixels_written += composite(&mut framebuffer, &edges, color);
                stats.drawn += 1;
            }
            _ => stats.culled += 1,
        }
    }

    Ok(RenderedFrame { framebuffer, stats })
}
