//! Rasterization: culling, shading, scan conversion and the z-buffer.

pub mod edge_list;
pub mod framebuffer;
pub mod scanline;
pub mod shading;

pub use edge_list::{EdgeList, EdgeRow};
pub use framebuffer::FrameBuffer;
pub use scanline::{composite, scan_convert};
pub use shading::{is_hidden, normal, plan_faces, shade, FacePlan};
