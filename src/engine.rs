//! Core rendering engine.
//!
//! The [`Engine`] owns the loaded scene, its fitted baseline and the viewer
//! state, and hands out one [`RenderedFrame`] per call to
//! [`FrameRenderer::render`]. Display code only talks to the trait.

use std::path::Path;

use crate::colors::Color;
use crate::config::ViewerConfig;
use crate::loader::{self, LoadError};
use crate::pipeline::{self, Canvas, FitError, RenderedFrame};
use crate::render::FrameBuffer;
use crate::scene::Scene;
use crate::viewer::{ViewCommand, ViewState};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Something that can produce frames for a display surface.
///
/// Inputs (camera, lights, canvas size) live in the implementor; the caller
/// only asks for the next frame.
pub trait FrameRenderer {
    fn canvas(&self) -> Canvas;

    /// Renders the next frame into a freshly allocated framebuffer.
    fn render(&mut self) -> Result<RenderedFrame, RenderError>;
}

/// A scene as loaded, plus its auto-fitted framing for the current canvas.
struct LoadedScene {
    original: Scene,
    baseline: Scene,
}

pub struct Engine {
    config: ViewerConfig,
    scene: Option<LoadedScene>,
    view: ViewState,
}

impl Engine {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            view: ViewState::new(&config),
            config,
            scene: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Loads a model file and installs it.
    ///
    /// On any error the previously loaded scene and the view stay as they
    /// were.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RenderError> {
        let result = loader::load_scene(path.as_ref())
            .map_err(RenderError::from)
            .and_then(|scene| self.set_scene(scene));
        if let Err(e) = &result {
            log::warn!("keeping previous scene, load of {} failed: {e}", path.as_ref().display());
        }
        result
    }

    /// Installs `scene`, fits it to the canvas and resets the camera.
    ///
    /// A scene that cannot be fitted (no polygons, or no extent at all) is
    /// rejected and the current state is kept.
    pub fn set_scene(&mut self, scene: Scene) -> Result<(), RenderError> {
        let baseline = pipeline::auto_fit(&scene, &scene.bounds(), self.config.canvas)?;
        log::info!(
            "scene ready: {} polygons on a {}x{} canvas",
            scene.len(),
            self.config.canvas.width,
            self.config.canvas.height
        );
        self.scene = Some(LoadedScene {
            original: scene,
            baseline,
        });
        self.view.reset_camera(&self.config);
        Ok(())
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// The scene as loaded, before any fitting.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref().map(|s| &s.original)
    }

    /// The scene scaled and centred for the canvas.
    pub fn baseline(&self) -> Option<&Scene> {
        self.scene.as_ref().map(|s| &s.baseline)
    }

    /// Changes the canvas and refits the loaded scene to it.
    pub fn resize(&mut self, canvas: Canvas) -> Result<(), RenderError> {
        if let Some(loaded) = &mut self.scene {
            loaded.baseline = pipeline::auto_fit(&loaded.original, &loaded.original.bounds(), canvas)?;
        }
        self.config.canvas = canvas;
        Ok(())
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn apply(&mut self, command: ViewCommand) {
        self.view.apply(command, &self.config);
    }

    pub fn set_ambient(&mut self, ambient: Color) {
        self.view.ambient = ambient;
    }

    pub fn set_light(&mut self, light: Color) {
        self.view.light = light;
    }
}

impl FrameRenderer for Engine {
    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    /// With no scene loaded the frame is plain background.
    fn render(&mut self) -> Result<RenderedFrame, RenderError> {
        let canvas = self.config.canvas;
        let Some(loaded) = &self.scene else {
            return Ok(RenderedFrame {
                framebuffer: FrameBuffer::new(canvas.width, canvas.height, self.config.background),
                stats: Default::default(),
            });
        };

        let frame = pipeline::render_frame(
            &loaded.baseline,
            &self.view.frame_input(),
            canvas,
            self.config.background,
        )?;
        log::debug!(
            "frame: {} drawn, {} culled, {} pixels",
            frame.stats.drawn,
            frame.stats.culled,
            frame.stats.pixels_written
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::math::vec3::Vec3;
    use crate::scene::Polygon;
    use std::io::Write;

    fn small_config() -> ViewerConfig {
        ViewerConfig {
            canvas: Canvas::new(40, 40),
            ..ViewerConfig::default()
        }
    }

    fn triangle_scene() -> Scene {
        Scene::new(
            vec![Polygon::from_coords(
                [0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 10.0, 0.0, 0.0],
                WHITE,
            )],
            Vec3::new(0.0, 0.0, -1.0),
        )
    }

    #[test]
    fn test_render_without_scene_is_background() {
        let mut engine = Engine::new(small_config());
        let frame = engine.render().unwrap();
        assert!(frame
            .framebuffer
            .pixels()
            .iter()
            .all(|&c| c == engine.config().background));
        assert_eq!(frame.stats.drawn, 0);
    }

    #[test]
    fn test_render_scene() {
        let mut engine = Engine::new(small_config());
        engine.set_scene(triangle_scene()).unwrap();
        let frame = engine.render().unwrap();
        assert_eq!(frame.stats.drawn, 1);
        // Fitted light is (10, 10, -2): 128 + 128 * 2 / sqrt(204) = 145
        assert_eq!(frame.framebuffer.color_at(12, 12), Some(Color::gray(145)));
    }

    #[test]
    fn test_light_levels_change_shade() {
        let mut engine = Engine::new(small_config());
        engine.set_scene(triangle_scene()).unwrap();
        engine.set_ambient(Color::gray(40));
        engine.set_light(BLACK);
        let frame = engine.render().unwrap();
        assert_eq!(frame.framebuffer.color_at(12, 12), Some(Color::gray(40)));
    }

    #[test]
    fn test_rejected_scene_keeps_previous() {
        let mut engine = Engine::new(small_config());
        engine.set_scene(triangle_scene()).unwrap();
        engine.apply(ViewCommand::RotateLeft);

        let empty = Scene::new(Vec::new(), Vec3::ZERO);
        assert!(matches!(
            engine.set_scene(empty),
            Err(RenderError::Fit(FitError::EmptyScene))
        ));
        assert_eq!(engine.scene(), Some(&triangle_scene()));
        assert!(engine.view().rotation_y > 0.0);
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let mut engine = Engine::new(small_config());
        engine.set_scene(triangle_scene()).unwrap();

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "0 0 -1").unwrap();
        writeln!(bad, "0 0 0 10 0 0 0 10 0 255 0").unwrap();
        assert!(matches!(
            engine.load_file(bad.path()),
            Err(RenderError::Load(LoadError::TokenCount { .. }))
        ));
        assert_eq!(engine.scene(), Some(&triangle_scene()));
    }

    #[test]
    fn test_load_resets_camera() {
        let mut engine = Engine::new(small_config());
        engine.apply(ViewCommand::ZoomIn);
        engine.apply(ViewCommand::PanLeft);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 0 -1").unwrap();
        writeln!(file, "0 0 0 0 10 0 10 0 0 255 255 255").unwrap();
        engine.load_file(file.path()).unwrap();

        assert_eq!(engine.view().zoom, 1.0);
        assert_eq!(engine.view().pan, Vec3::ZERO);
        assert!(engine.has_scene());
    }

    #[test]
    fn test_resize_refits() {
        let mut engine = Engine::new(small_config());
        engine.set_scene(triangle_scene()).unwrap();
        engine.resize(Canvas::new(100, 60)).unwrap();
        let bounds = engine.baseline().unwrap().bounds();
        // min(50/10, 30/10) = 3
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.center().x, 50.0);
        let frame = engine.render().unwrap();
        assert_eq!(frame.framebuffer.width(), 100);
        assert_eq!(frame.framebuffer.height(), 60);
    }

    #[test]
    fn test_zoom_changes_coverage() {
        let mut engine = Engine::new(small_config());
        engine.set_scene(triangle_scene()).unwrap();
        let base = engine.render().unwrap().stats.pixels_written;
        engine.apply(ViewCommand::ZoomOut);
        let smaller = engine.render().unwrap().stats.pixels_written;
        assert!(smaller < base);
    }
}
