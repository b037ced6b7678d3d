//! Grid Builder and Scene Assembly.
//!
//! Walks the grid once, resolves each cell's color, places a cube and
//! collects the result with lights and a camera rig into a `Scene`.
//!
//! # Invariants
//! - Exactly `(rows-1) * (cols-1)` cells, row-major, unique coordinates.
//! - Invalid dimensions are rejected before any cell is produced.
//! - The scene is never mutated after assembly.

mod config;
mod grid;
mod scene;

pub use config::{ConfigOverrides, MosaicConfig};
pub use grid::{Cell, Centering, GridSpec, build_grid};
pub use scene::{AmbientLight, CameraRig, DirectionalLight, Scene};

/// Errors from grid construction and scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid grid dimensions {rows}x{cols}: both must be at least 1 and the grid must fit in memory")]
    InvalidDimensions { rows: u32, cols: u32 },
    #[error("invalid cell size {0}: must be positive and finite")]
    InvalidCellSize(f32),
    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),
    #[error("palette error: {0}")]
    Palette(#[from] mosaic_palette::PaletteError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
