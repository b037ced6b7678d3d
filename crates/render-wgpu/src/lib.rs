//! wgpu render backend for the mosaic.
//!
//! Draws each scene cell as an instanced unit cube scaled to the cell size,
//! shaded with one directional and one ambient light.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Colors are converted from sRGB to linear before upload.

mod gpu;
mod shaders;
mod target;

pub use gpu::CubeRenderer;
pub use target::WgpuTarget;
