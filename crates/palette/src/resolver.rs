use crate::art;
use crate::table::{OverrideTable, PaletteError};
use mosaic_common::{GridCoord, Rgb};
use std::collections::HashMap;

/// Final color per cell, folded once from an `OverrideTable`.
///
/// Keys are `row * cols + col`. Folding inserts entries in declaration
/// order, so a later entry replaces an earlier one for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    cols: u32,
    base: Rgb,
    colors: HashMap<u64, Rgb>,
}

impl Palette {
    /// Fold a table for a grid `cols` wide.
    pub fn from_table(table: &OverrideTable, cols: u32) -> Result<Self, PaletteError> {
        table.validate(cols)?;
        let mut colors = HashMap::new();
        for entry in table.entries() {
            colors.insert(entry.coord.key(cols), entry.color);
        }
        tracing::debug!(
            entries = table.len(),
            cells = colors.len(),
            "folded override table"
        );
        Ok(Self {
            cols,
            base: table.base,
            colors,
        })
    }

    /// The embedded mosaic art.
    pub fn builtin() -> Self {
        let table = art::builtin_table();
        let mut colors = HashMap::new();
        for entry in table.entries() {
            colors.insert(entry.coord.key(art::COLS), entry.color);
        }
        Self {
            cols: art::COLS,
            base: table.base,
            colors,
        }
    }

    /// A palette with no overrides: every cell resolves to `base`.
    pub fn uniform(base: Rgb, cols: u32) -> Self {
        Self {
            cols,
            base,
            colors: HashMap::new(),
        }
    }

    /// Color for a cell. Cells without an override get the base color.
    pub fn resolve_color(&self, coord: GridCoord) -> Rgb {
        if coord.col >= self.cols {
            return self.base;
        }
        self.colors
            .get(&coord.key(self.cols))
            .copied()
            .unwrap_or(self.base)
    }

    pub fn base(&self) -> Rgb {
        self.base
    }

    /// Grid width the keys were computed for.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of distinct cells with an override.
    pub fn override_count(&self) -> usize {
        self.colors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PaletteGroup, Span};

    const A: Rgb = Rgb(0xaa0000);
    const B: Rgb = Rgb(0x00bb00);

    #[test]
    fn default_color_without_override() {
        let palette = Palette::builtin();
        assert_eq!(palette.resolve_color(GridCoord::new(1, 1)), Rgb::BASE);
    }

    #[test]
    fn later_entry_wins() {
        let mut table = OverrideTable::default();
        let c = GridCoord::new(3, 4);
        table.push(c, A);
        table.push(c, B);
        let palette = Palette::from_table(&table, 10).unwrap();
        assert_eq!(palette.resolve_color(c), B);
        assert_eq!(palette.override_count(), 1);
    }

    #[test]
    fn later_group_recolors_earlier_span() {
        let mut table = OverrideTable::default();
        table.push_group(PaletteGroup::new("line", A, vec![Span::new(2, 1, 5)]));
        table.push_group(PaletteGroup::new("dot", B, vec![Span::cell(2, 3)]));
        let palette = Palette::from_table(&table, 10).unwrap();

        assert_eq!(palette.resolve_color(GridCoord::new(2, 2)), A);
        assert_eq!(palette.resolve_color(GridCoord::new(2, 3)), B);
        assert_eq!(palette.resolve_color(GridCoord::new(2, 4)), A);
    }

    #[test]
    fn resolution_is_idempotent() {
        let palette = Palette::builtin();
        let c = GridCoord::new(10, 8);
        let first = palette.resolve_color(c);
        let second = palette.resolve_color(c);
        assert_eq!(first, second);
    }

    #[test]
    fn folded_matches_sequential_scan() {
        let table = art::builtin_table();
        let palette = Palette::builtin();
        for row in 1..art::ROWS {
            for col in 1..art::COLS {
                let c = GridCoord::new(row, col);
                assert_eq!(palette.resolve_color(c), table.resolve_sequential(c), "at {c}");
            }
        }
    }

    #[test]
    fn from_table_matches_builtin() {
        let folded = Palette::from_table(&art::builtin_table(), art::COLS).unwrap();
        assert_eq!(folded, Palette::builtin());
    }

    #[test]
    fn from_table_propagates_validation() {
        let mut table = OverrideTable::default();
        table.push(GridCoord::new(1, 12), A);
        assert!(Palette::from_table(&table, 12).is_err());
    }

    #[test]
    fn uniform_palette_has_no_overrides() {
        let palette = Palette::uniform(Rgb(0x222222), 8);
        assert_eq!(palette.override_count(), 0);
        assert_eq!(palette.resolve_color(GridCoord::new(3, 3)), Rgb(0x222222));
    }

    #[test]
    fn out_of_range_column_falls_back_to_base() {
        let palette = Palette::builtin();
        // (1, 30) would alias (2, 5) through the flat key
        assert_eq!(palette.resolve_color(GridCoord::new(1, 30)), Rgb::BASE);
    }
}
