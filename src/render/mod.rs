//! Frame rendering: geometry, connector gradients, sprite selection, and compositing.

/// Background template assembly.
pub mod background;
pub(crate) mod composite;
/// Per-bucket frame compositor.
pub mod compositor;
/// Note record to screen geometry.
pub mod geometry;
/// Hold connector gradient rasterizer.
pub mod gradient;
/// Premultiplied RGBA8 raster.
pub mod raster;
/// Sprite key resolution and scaling.
pub mod sprite;
