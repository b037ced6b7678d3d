use crate::camera::OrbitCamera;
use mosaic_common::Rgb;
use mosaic_scene::Scene;

/// Errors from render targets.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The host cannot provide a rendering surface. Fatal at startup.
    #[error("rendering surface unavailable: {0}")]
    Unavailable(String),
    #[error("surface error: {0}")]
    Surface(String),
}

/// A surface that draws a scene through a camera.
///
/// Targets read the scene and camera and never mutate them.
pub trait RenderTarget {
    /// The output type produced by one frame.
    type Output;

    /// Resize the output viewport. Safe to repeat with the same size.
    fn resize(&mut self, width: u32, height: u32);

    /// Current viewport size in pixels.
    fn size(&self) -> (u32, u32);

    /// Render one frame.
    fn render_frame(
        &mut self,
        scene: &Scene,
        camera: &OrbitCamera,
    ) -> Result<Self::Output, RenderError>;
}

const GLYPHS: &[u8] = b".#o+*=%@&$";

/// Headless text renderer.
///
/// Produces a summary header and one glyph per cell, one line per row, with
/// a legend mapping glyphs to colors. Glyphs are assigned in order of first
/// appearance.
#[derive(Debug)]
pub struct DebugTextRenderer {
    width: u32,
    height: u32,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl DebugTextRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl RenderTarget for DebugTextRenderer {
    type Output = String;

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render_frame(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<String, RenderError> {
        let mut out = String::new();
        let eye = camera.position();
        let light = scene.directional();
        let ambient = scene.ambient();

        out.push_str(&format!(
            "=== Mosaic (cells={}, viewport={}x{}) ===\n",
            scene.len(),
            self.width,
            self.height
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}\n",
            eye.x,
            eye.y,
            eye.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov.to_degrees(),
            camera.aspect
        ));
        out.push_str(&format!(
            "Lights: directional {} x{:.2} dir=({:.2}, {:.2}, {:.2}), ambient {} x{:.2}\n",
            light.color,
            light.intensity,
            light.direction.x,
            light.direction.y,
            light.direction.z,
            ambient.color,
            ambient.intensity
        ));

        let mut legend: Vec<Rgb> = Vec::new();
        let mut current_row = None;
        for cell in scene.cells() {
            if current_row.is_some_and(|row| row != cell.coord.row) {
                out.push('\n');
            }
            current_row = Some(cell.coord.row);

            let index = match legend.iter().position(|c| *c == cell.color) {
                Some(i) => i,
                None => {
                    legend.push(cell.color);
                    legend.len() - 1
                }
            };
            out.push(GLYPHS.get(index).copied().unwrap_or(b'?') as char);
        }
        if current_row.is_some() {
            out.push('\n');
        }

        for (i, color) in legend.iter().enumerate() {
            let glyph = GLYPHS.get(i).copied().unwrap_or(b'?') as char;
            out.push_str(&format!("  {glyph} = {color}\n"));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_palette::Palette;
    use mosaic_scene::{GridSpec, MosaicConfig};

    fn scene(rows: u32, cols: u32) -> Scene {
        let config = MosaicConfig {
            grid: GridSpec::new(rows, cols, 1.0),
            ..MosaicConfig::default()
        };
        Scene::assemble(&config, &Palette::builtin()).unwrap()
    }

    #[test]
    fn header_reports_cells_and_viewport() {
        let mut renderer = DebugTextRenderer::new(800, 600);
        let out = renderer
            .render_frame(&scene(20, 25), &OrbitCamera::default())
            .unwrap();
        assert!(out.contains("cells=456"));
        assert!(out.contains("viewport=800x600"));
        assert!(out.contains("ambient #404040"));
    }

    #[test]
    fn one_line_per_row() {
        let mut renderer = DebugTextRenderer::default();
        let out = renderer
            .render_frame(&scene(20, 25), &OrbitCamera::default())
            .unwrap();
        let art: Vec<&str> = out
            .lines()
            .skip(3)
            .take_while(|l| !l.starts_with("  "))
            .collect();
        assert_eq!(art.len(), 19);
        assert!(art.iter().all(|l| l.len() == 24));
        // (1,1) base, (1,5) black ear tip
        assert_eq!(&art[0][..5], "....#");
        assert!(out.contains("  . = #ffffff"));
        assert!(out.contains("  # = #000000"));
    }

    #[test]
    fn empty_scene_renders_header_only() {
        let mut renderer = DebugTextRenderer::default();
        let out = renderer
            .render_frame(&scene(1, 25), &OrbitCamera::default())
            .unwrap();
        assert!(out.contains("cells=0"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn resize_updates_size() {
        let mut renderer = DebugTextRenderer::new(800, 600);
        renderer.resize(1024, 768);
        assert_eq!(renderer.size(), (1024, 768));
    }
}
