use crate::SceneError;
use crate::config::MosaicConfig;
use crate::grid::Cell;
use glam::Vec3;
use mosaic_common::{GridCoord, Rgb};
use mosaic_palette::Palette;
use serde::{Deserialize, Serialize};

/// Perspective camera placement and projection at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRig {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 30.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Reject projections and placements the orbit camera cannot use.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.fov_degrees.is_finite() && self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(SceneError::InvalidCamera("fov must be between 0 and 180 degrees"));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(SceneError::InvalidCamera("aspect must be positive"));
        }
        if !(self.near.is_finite() && self.far.is_finite() && 0.0 < self.near && self.near < self.far)
        {
            return Err(SceneError::InvalidCamera("clip planes must satisfy 0 < near < far"));
        }
        if !(self.position.is_finite() && self.target.is_finite()) {
            return Err(SceneError::InvalidCamera("position and target must be finite"));
        }
        if self.position == self.target {
            return Err(SceneError::InvalidCamera("position must differ from target"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    /// Direction from the scene towards the light.
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Rgb(0xffffff),
            intensity: 1.0,
            direction: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Rgb(0x404040),
            intensity: 1.0,
        }
    }
}

/// The assembled mosaic: cubes, lights and initial camera.
///
/// Built once and never mutated afterwards. The live camera that orbits
/// the mosaic is owned by the frame context, seeded from `camera()`.
#[derive(Debug, Clone)]
pub struct Scene {
    cells: Vec<Cell>,
    camera: CameraRig,
    directional: DirectionalLight,
    ambient: AmbientLight,
}

impl Scene {
    /// Build the grid and wire lights and camera from `config`.
    ///
    /// Fails before anything is published if the grid dimensions, cell size
    /// or camera rig are invalid.
    pub fn assemble(config: &MosaicConfig, palette: &Palette) -> Result<Self, SceneError> {
        config.camera.validate()?;
        let cells = config.grid.build(palette)?;
        tracing::info!(
            cells = cells.len(),
            overrides = palette.override_count(),
            "scene assembled"
        );
        Ok(Self {
            cells,
            camera: config.camera,
            directional: config.directional,
            ambient: config.ambient,
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_at(&self, coord: GridCoord) -> Option<&Cell> {
        self.cells.iter().find(|c| c.coord == coord)
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn directional(&self) -> &DirectionalLight {
        &self.directional
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    #[test]
    fn assemble_default_scene() {
        let scene = Scene::assemble(&MosaicConfig::default(), &Palette::builtin()).unwrap();
        assert_eq!(scene.len(), 456);
        assert_eq!(scene.camera().target, Vec3::ZERO);
        assert_eq!(scene.ambient().color, Rgb(0x404040));
        assert_eq!(
            scene.cell_at(GridCoord::new(1, 5)).map(|c| c.color),
            Some(Rgb::BLACK)
        );
    }

    #[test]
    fn assemble_rejects_invalid_grid() {
        let config = MosaicConfig {
            grid: GridSpec::new(20, 25, 0.0),
            ..MosaicConfig::default()
        };
        assert!(matches!(
            Scene::assemble(&config, &Palette::builtin()),
            Err(SceneError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn assemble_rejects_invalid_camera() {
        let breakages: [fn(&mut CameraRig); 8] = [
            |c| c.near = 0.0,
            |c| (c.near, c.far) = (5.0, 5.0),
            |c| c.far = f32::INFINITY,
            |c| c.fov_degrees = 180.0,
            |c| c.fov_degrees = f32::NAN,
            |c| c.aspect = 0.0,
            |c| c.position.y = f32::NAN,
            |c| c.position = c.target,
        ];
        for breakage in breakages {
            let mut config = MosaicConfig::default();
            breakage(&mut config.camera);
            assert!(
                matches!(
                    Scene::assemble(&config, &Palette::builtin()),
                    Err(SceneError::InvalidCamera(_))
                ),
                "accepted {:?}",
                config.camera
            );
        }
    }

    #[test]
    fn assemble_accepts_short_far_plane() {
        let config: MosaicConfig = serde_json::from_str(
            r#"{ "camera": { "far": 1.0, "position": [0.0, 0.0, 0.5] } }"#,
        )
        .unwrap();
        let scene = Scene::assemble(&config, &Palette::builtin()).unwrap();
        assert_eq!(scene.camera().far, 1.0);
    }

    #[test]
    fn cell_at_misses_skipped_indices() {
        let scene = Scene::assemble(&MosaicConfig::default(), &Palette::builtin()).unwrap();
        assert!(scene.cell_at(GridCoord::new(0, 3)).is_none());
        assert!(scene.cell_at(GridCoord::new(3, 25)).is_none());
    }
}
