use crate::SceneError;
use glam::Vec3;
use mosaic_common::{GridCoord, Rgb};
use mosaic_palette::Palette;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One grid position's resolved color and world placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub coord: GridCoord,
    pub color: Rgb,
    pub position: Vec3,
    /// Edge length of the cube.
    pub size: f32,
}

/// How the grid is shifted towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Centering {
    /// `offsetX = -(cols-1)*S/2`, `offsetY = -(rows-1)*S/2`.
    ///
    /// Because row 0 and column 0 are skipped, the visited cells end up half
    /// a cell right of and below the origin.
    #[default]
    Offset,
    /// Offsets computed from the visited extent, so the mean cell position
    /// is exactly the origin.
    Visited,
}

impl FromStr for Centering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset" => Ok(Self::Offset),
            "visited" => Ok(Self::Visited),
            other => Err(format!("unknown centering {other:?}: expected offset or visited")),
        }
    }
}

/// Grid dimensions and layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub cell_size: f32,
    pub centering: Centering,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: mosaic_palette::art::ROWS,
            cols: mosaic_palette::art::COLS,
            cell_size: 1.0,
            centering: Centering::Offset,
        }
    }
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32, cell_size: f32) -> Self {
        Self {
            rows,
            cols,
            cell_size,
            centering: Centering::default(),
        }
    }

    pub fn with_centering(mut self, centering: Centering) -> Self {
        self.centering = centering;
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        // The cell buffer must be addressable.
        let addressable = (self.rows.saturating_sub(1) as usize)
            .checked_mul(self.cols.saturating_sub(1) as usize)
            .and_then(|n| n.checked_mul(std::mem::size_of::<Cell>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if self.rows == 0 || self.cols == 0 || !addressable {
            return Err(SceneError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SceneError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    /// Number of cells `build` produces: rows `1..rows` by columns `1..cols`.
    ///
    /// Saturates for dimensions that `validate` rejects.
    pub fn cell_count(&self) -> usize {
        (self.rows.saturating_sub(1) as usize).saturating_mul(self.cols.saturating_sub(1) as usize)
    }

    /// `(offsetX, offsetY)` for the configured centering.
    pub fn offsets(&self) -> (f32, f32) {
        let s = self.cell_size;
        let (across, down) = match self.centering {
            Centering::Offset => (
                self.cols.saturating_sub(1) as f32,
                self.rows.saturating_sub(1) as f32,
            ),
            Centering::Visited => (self.cols as f32, self.rows as f32),
        };
        (-across * s / 2.0, -down * s / 2.0)
    }

    /// World position of the cube at `coord`.
    pub fn position(&self, coord: GridCoord) -> Vec3 {
        let s = self.cell_size;
        let (offset_x, offset_y) = self.offsets();
        Vec3::new(
            coord.col as f32 * s + offset_x,
            -(coord.row as f32) * s - offset_y,
            0.0,
        )
    }

    /// Build every cell, row-major ascending, coloring each from `palette`.
    pub fn build(&self, palette: &Palette) -> Result<Vec<Cell>, SceneError> {
        self.validate()?;
        let mut cells = Vec::with_capacity(self.cell_count());
        for row in 1..self.rows {
            for col in 1..self.cols {
                let coord = GridCoord::new(row, col);
                cells.push(Cell {
                    coord,
                    color: palette.resolve_color(coord),
                    position: self.position(coord),
                    size: self.cell_size,
                });
            }
        }
        tracing::debug!(
            rows = self.rows,
            cols = self.cols,
            cells = cells.len(),
            "built grid"
        );
        Ok(cells)
    }
}

/// Build a `rows` x `cols` grid with default centering.
pub fn build_grid(
    rows: u32,
    cols: u32,
    cell_size: f32,
    palette: &Palette,
) -> Result<Vec<Cell>, SceneError> {
    GridSpec::new(rows, cols, cell_size).build(palette)
}
