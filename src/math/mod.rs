//! Vector math used by the pipeline.

pub mod vec3;

pub use vec3::Vec3;
