//! A flat-shaded CPU scanline renderer for triangle models.
//!
//! Models are plain text: a light direction followed by one coloured
//! triangle per line. Each frame is rotated, zoomed and panned, back faces
//! are culled, every visible polygon gets one flat colour from ambient plus
//! Lambertian light, and a z-buffered scanline fill writes it to a
//! [`render::FrameBuffer`]. SDL2 is used only to show the result, behind the
//! `window` feature.
//!
//! # Quick Start
//!
//! ```ignore
//! use flatrast::prelude::*;
//!
//! let mut engine = Engine::new(ViewerConfig::default());
//! engine.load_file("monkey.txt")?;
//! engine.apply(ViewCommand::RotateLeft);
//! engine.render()?.framebuffer.save_png("monkey.png")?;
//! ```

pub mod colors;
pub mod config;
pub mod engine;
pub mod loader;
pub mod math;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod transform;
pub mod viewer;
#[cfg(feature = "window")]
pub mod window;

pub use config::ViewerConfig;
pub use engine::{Engine, FrameRenderer, RenderError};
pub use loader::LoadError;
pub use pipeline::{Canvas, FitError};
pub use scene::{Polygon, Scene};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use flatrast::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colors::Color;
    pub use crate::config::{ConfigError, ViewerConfig};
    pub use crate::engine::{Engine, FrameRenderer, RenderError};
    pub use crate::loader::{load_scene, LoadError};
    pub use crate::math::vec3::Vec3;
    pub use crate::pipeline::{Canvas, FitError, FrameStats, RenderedFrame};
    pub use crate::scene::{Bounds, Polygon, Scene};
    pub use crate::transform::Transform;
    pub use crate::viewer::{DragMode, FrameInput, ViewCommand, ViewState};

    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{composite, scan_convert, EdgeList, FrameBuffer};
}
