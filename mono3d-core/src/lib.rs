//! mono3d Core Library - software rasterizer for 1-bit displays
//!
//! This library provides the rendering pipeline for a small monochrome
//! panel: vector and matrix math, the mesh model, perspective projection,
//! ordered dithering, and triangle/line rasterization into a packed
//! framebuffer owned by the host.

pub mod config;
pub mod dither;
pub mod framebuffer;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod renderer;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::{CameraConfig, RendererConfig};
pub use dither::{bayer_value, BayerSize};
pub use framebuffer::{DisplayGeometry, FrameBuffer};
pub use geometry::{Mesh, Triangle};
pub use projection::Camera;
pub use renderer::{FrameStatus, Renderer, ScreenTriangle};
pub use transform::{RotationState, Transform};
pub use vector::Vector3;
