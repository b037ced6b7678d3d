//! Palette Resolver: maps grid coordinates to cube colors.
//!
//! The art is an ordered table of color overrides painted over a base color.
//! Tables are folded once into a `Palette`, after which resolution is a single
//! lookup per cell.
//!
//! # Invariants
//! - At most one effective color per coordinate; the last-declared entry wins.
//! - Resolution is pure: same coordinate, same color, no hidden state.

pub mod art;
mod resolver;
mod table;

pub use resolver::Palette;
pub use table::{ColorOverride, OverrideTable, PaletteError, PaletteGroup, Span};

impl OverrideTable {
    /// The embedded art table.
    pub fn builtin() -> Self {
        art::builtin_table()
    }
}
