//! Embedded mosaic art: a cat face on a 20 x 25 grid.
//!
//! Groups paint over each other in order. `outline` fills whole runs black,
//! then `fur`, `inner-ear` and `eyes` recolor the interior, and `features`
//! puts black pupils, mouth and whisker gaps back on top.

use crate::table::{OverrideTable, PaletteGroup, Span};
use mosaic_common::Rgb;

pub const ROWS: u32 = 20;
pub const COLS: u32 = 25;

pub const FUR: Rgb = Rgb(0xf28c28);
pub const INNER_EAR: Rgb = Rgb(0xf4a6b8);
pub const EYES: Rgb = Rgb(0x3cb371);

type Run = (u32, u32, u32);

#[rustfmt::skip]
const OUTLINE: &[Run] = &[
    (1, 5, 5), (1, 20, 20),
    (2, 5, 6), (2, 19, 20),
    (3, 5, 7), (3, 18, 20),
    (4, 5, 8), (4, 17, 20),
    (5, 5, 20),
    (6, 5, 5), (6, 20, 20),
    (7, 4, 21),
    (8, 4, 21),
    (9, 3, 22),
    (10, 3, 22),
    (11, 3, 22),
    (12, 3, 22),
    (13, 1, 24),
    (14, 3, 22),
    (15, 1, 24),
    (16, 4, 21),
    (17, 5, 20),
    (18, 6, 19),
    (19, 8, 17),
];

#[rustfmt::skip]
const FUR_FILL: &[Run] = &[
    (3, 6, 6), (3, 19, 19),
    (4, 6, 7), (4, 18, 19),
    (5, 6, 8), (5, 17, 19),
    (6, 6, 19),
    (7, 5, 20),
    (8, 5, 20),
    (9, 4, 21),
    (10, 4, 21),
    (11, 4, 21),
    (12, 4, 21),
    (13, 4, 21),
    (14, 4, 21),
    (15, 4, 21),
    (16, 5, 20),
    (17, 6, 19),
    (18, 8, 17),
];

#[rustfmt::skip]
const INNER_EAR_FILL: &[Run] = &[
    (5, 7, 7), (5, 18, 18),
    (6, 7, 7), (6, 18, 18),
    // nose
    (12, 12, 13),
];

#[rustfmt::skip]
const EYE_FILL: &[Run] = &[
    (9, 7, 8), (9, 17, 18),
    (10, 7, 7), (10, 18, 18),
];

#[rustfmt::skip]
const FEATURES: &[Run] = &[
    // pupils
    (10, 8, 8), (10, 17, 17),
    // mouth
    (13, 12, 13),
    (14, 11, 11), (14, 14, 14),
];

fn group(name: &str, color: Rgb, runs: &[Run]) -> PaletteGroup {
    let spans = runs
        .iter()
        .map(|&(row, from, to)| Span::new(row, from, to))
        .collect();
    PaletteGroup::new(name, color, spans)
}

/// The built-in table, in paint order.
pub fn builtin_table() -> OverrideTable {
    let mut table = OverrideTable::new(Rgb::BASE);
    table.push_group(group("outline", Rgb::BLACK, OUTLINE));
    table.push_group(group("fur", FUR, FUR_FILL));
    table.push_group(group("inner-ear", INNER_EAR, INNER_EAR_FILL));
    table.push_group(group("eyes", EYES, EYE_FILL));
    table.push_group(group("features", Rgb::BLACK, FEATURES));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Palette;
    use mosaic_common::GridCoord;

    fn at(row: u32, col: u32) -> Rgb {
        Palette::builtin().resolve_color(GridCoord::new(row, col))
    }

    #[test]
    fn builtin_table_is_valid() {
        assert!(builtin_table().validate(COLS).is_ok());
    }

    #[test]
    fn ear_tip_is_black() {
        assert_eq!(at(1, 5), Rgb::BLACK);
        assert_eq!(at(1, 20), Rgb::BLACK);
    }

    #[test]
    fn corners_keep_base_color() {
        assert_eq!(at(1, 1), Rgb::BASE);
        assert_eq!(at(1, 24), Rgb::BASE);
        assert_eq!(at(19, 1), Rgb::BASE);
        assert_eq!(at(19, 24), Rgb::BASE);
    }

    #[test]
    fn interior_recolors_outline_runs() {
        // row 5 is a solid black run before fur and ears are applied
        assert_eq!(at(5, 5), Rgb::BLACK);
        assert_eq!(at(5, 6), FUR);
        assert_eq!(at(5, 7), INNER_EAR);
        assert_eq!(at(5, 12), Rgb::BLACK);
    }

    #[test]
    fn pupils_repainted_black_over_eyes() {
        assert_eq!(at(10, 7), EYES);
        assert_eq!(at(10, 8), Rgb::BLACK);
        assert_eq!(at(10, 17), Rgb::BLACK);
        assert_eq!(at(9, 8), EYES);
    }

    #[test]
    fn face_is_mirror_symmetric() {
        for row in 1..ROWS {
            for col in 1..COLS {
                assert_eq!(at(row, col), at(row, COLS - col), "at ({row}, {col})");
            }
        }
    }

    #[test]
    fn nose_and_whiskers() {
        assert_eq!(at(12, 12), INNER_EAR);
        assert_eq!(at(13, 12), Rgb::BLACK);
        assert_eq!(at(13, 1), Rgb::BLACK);
        assert_eq!(at(15, 24), Rgb::BLACK);
        assert_eq!(at(14, 1), Rgb::BASE);
    }
}
