use crate::SceneError;
use crate::grid::{Centering, GridSpec};
use crate::scene::{AmbientLight, CameraRig, DirectionalLight};
use mosaic_palette::{OverrideTable, Palette};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to assemble a scene. Missing fields take defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    pub grid: GridSpec,
    /// Override table file. The embedded art is used when unset.
    pub palette: Option<PathBuf>,
    pub camera: CameraRig,
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
}

/// Command-line values that replace fields of a loaded config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub palette: Option<PathBuf>,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub cell_size: Option<f32>,
    pub centering: Option<Centering>,
}

impl MosaicConfig {
    /// Load `path` if given, otherwise start from defaults, then apply `overrides`.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, SceneError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(palette) = overrides.palette {
            self.palette = Some(palette);
        }
        if let Some(rows) = overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = overrides.cols {
            self.grid.cols = cols;
        }
        if let Some(cell_size) = overrides.cell_size {
            self.grid.cell_size = cell_size;
        }
        if let Some(centering) = overrides.centering {
            self.grid.centering = centering;
        }
        self
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Save the config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Resolve the palette this config points at.
    pub fn load_palette(&self) -> Result<Palette, SceneError> {
        match &self.palette {
            Some(path) => {
                let table = OverrideTable::load(path)?;
                tracing::info!("loaded palette table from {}", path.display());
                Ok(Palette::from_table(&table, self.grid.cols)?)
            }
            None => Ok(Palette::builtin()),
        }
    }
}
