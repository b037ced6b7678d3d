use mosaic_common::{GridCoord, Rgb};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from building or loading override tables.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("group {group:?} targets {coord}: rows and columns start at 1")]
    ZeroCoordinate { group: String, coord: GridCoord },
    #[error("group {group:?} targets {coord}: column out of bounds for {cols} columns")]
    OutOfBounds {
        group: String,
        coord: GridCoord,
        cols: u32,
    },
    #[error("group {group:?} has an empty span on row {row}: {from} > {to}")]
    EmptySpan {
        group: String,
        row: u32,
        from: u32,
        to: u32,
    },
}

/// A single coordinate → color exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOverride {
    pub coord: GridCoord,
    pub color: Rgb,
}

/// Inclusive run of columns `from..=to` on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub row: u32,
    pub from: u32,
    pub to: u32,
}

impl Span {
    pub fn new(row: u32, from: u32, to: u32) -> Self {
        Self { row, from, to }
    }

    pub fn cell(row: u32, col: u32) -> Self {
        Self::new(row, col, col)
    }

    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (self.from..=self.to).map(move |col| GridCoord::new(self.row, col))
    }
}

/// A named set of cells painted with one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteGroup {
    pub name: String,
    pub color: Rgb,
    pub spans: Vec<Span>,
}

impl PaletteGroup {
    pub fn new(name: impl Into<String>, color: Rgb, spans: Vec<Span>) -> Self {
        Self {
            name: name.into(),
            color,
            spans,
        }
    }
}

/// Ordered override table.
///
/// Entries are applied in declaration order: groups first to last, spans in
/// order within a group, columns ascending within a span. When several
/// entries target the same coordinate the last one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTable {
    pub base: Rgb,
    pub groups: Vec<PaletteGroup>,
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::new(Rgb::BASE)
    }
}

impl OverrideTable {
    /// Empty table over the given base color.
    pub fn new(base: Rgb) -> Self {
        Self {
            base,
            groups: Vec::new(),
        }
    }

    /// Append a group. It takes precedence over every group already present.
    pub fn push_group(&mut self, group: PaletteGroup) {
        self.groups.push(group);
    }

    /// Append a single-cell override.
    pub fn push(&mut self, coord: GridCoord, color: Rgb) {
        self.groups.push(PaletteGroup::new(
            "override",
            color,
            vec![Span::cell(coord.row, coord.col)],
        ));
    }

    /// All entries, flattened in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = ColorOverride> + '_ {
        self.groups.iter().flat_map(|group| {
            group.spans.iter().flat_map(move |span| {
                span.coords().map(move |coord| ColorOverride {
                    coord,
                    color: group.color,
                })
            })
        })
    }

    /// Number of flattened entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.spans.is_empty())
    }

    /// Reference resolution: scan every entry and keep the last match.
    ///
    /// `Palette` gives the same answer with a single lookup.
    pub fn resolve_sequential(&self, coord: GridCoord) -> Rgb {
        let mut color = self.base;
        for entry in self.entries() {
            if entry.coord == coord {
                color = entry.color;
            }
        }
        color
    }

    /// Check every span against 1-indexed, `cols`-wide grid bounds.
    pub fn validate(&self, cols: u32) -> Result<(), PaletteError> {
        for group in &self.groups {
            for span in &group.spans {
                if span.from > span.to {
                    return Err(PaletteError::EmptySpan {
                        group: group.name.clone(),
                        row: span.row,
                        from: span.from,
                        to: span.to,
                    });
                }
                if span.row == 0 || span.from == 0 {
                    return Err(PaletteError::ZeroCoordinate {
                        group: group.name.clone(),
                        coord: GridCoord::new(span.row, span.from),
                    });
                }
                if span.to >= cols {
                    return Err(PaletteError::OutOfBounds {
                        group: group.name.clone(),
                        coord: GridCoord::new(span.row, span.to),
                        cols,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn from_json(data: &str) -> Result<Self, PaletteError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let file = std::fs::File::open(path)?;
        let table: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(table)
    }

    /// Save the table to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PaletteError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgb = Rgb(0xaa0000);
    const B: Rgb = Rgb(0x00bb00);

    #[test]
    fn entries_follow_declaration_order() {
        let mut table = OverrideTable::default();
        table.push_group(PaletteGroup::new("a", A, vec![Span::new(1, 2, 4)]));
        table.push(GridCoord::new(3, 1), B);

        let coords: Vec<_> = table.entries().map(|e| (e.coord.row, e.coord.col)).collect();
        assert_eq!(coords, vec![(1, 2), (1, 3), (1, 4), (3, 1)]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn sequential_resolution_last_write_wins() {
        let mut table = OverrideTable::default();
        let c = GridCoord::new(2, 2);
        table.push(c, A);
        table.push(c, B);
        assert_eq!(table.resolve_sequential(c), B);
        assert_eq!(table.resolve_sequential(GridCoord::new(1, 1)), Rgb::BASE);
    }

    #[test]
    fn validate_rejects_zero_coordinates() {
        let mut table = OverrideTable::default();
        table.push(GridCoord::new(0, 3), A);
        assert!(matches!(
            table.validate(25),
            Err(PaletteError::ZeroCoordinate { .. })
        ));
    }

    #[test]
    fn validate_rejects_columns_past_grid() {
        let mut table = OverrideTable::default();
        table.push(GridCoord::new(1, 25), A);
        assert!(matches!(
            table.validate(25),
            Err(PaletteError::OutOfBounds { cols: 25, .. })
        ));
        assert!(table.validate(26).is_ok());
    }

    #[test]
    fn validate_rejects_reversed_span() {
        let mut table = OverrideTable::default();
        table.push_group(PaletteGroup::new("bad", A, vec![Span::new(1, 5, 3)]));
        assert!(matches!(
            table.validate(25),
            Err(PaletteError::EmptySpan { from: 5, to: 3, .. })
        ));
    }

    #[test]
    fn json_file_preserves_group_order() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut table = OverrideTable::new(Rgb(0x101010));
        table.push_group(PaletteGroup::new("first", A, vec![Span::new(4, 1, 3)]));
        table.push_group(PaletteGroup::new("second", B, vec![Span::cell(4, 2)]));
        table.save(tmp.path()).unwrap();

        let loaded = OverrideTable::load(tmp.path()).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded.resolve_sequential(GridCoord::new(4, 2)), B);
    }

    #[test]
    fn from_json_reads_hex_colors() {
        let table = OverrideTable::from_json(
            r##"{
                "base": "#ffffff",
                "groups": [
                    { "name": "dot", "color": "#123456", "spans": [{ "row": 2, "from": 3, "to": 3 }] }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(table.resolve_sequential(GridCoord::new(2, 3)), Rgb(0x123456));
    }

    #[test]
    fn from_json_rejects_bad_color() {
        let err = OverrideTable::from_json(r#"{ "base": "white", "groups": [] }"#);
        assert!(matches!(err, Err(PaletteError::Json(_))));
    }
}
