//! Shared value types for the mosaic workspace.
//!
//! # Invariants
//! - Grid coordinates are 1-indexed; row 0 and column 0 are never visited.
//! - Colors are plain packed values with no alpha.

mod types;

pub use types::{GridCoord, ParseRgbError, Rgb};
