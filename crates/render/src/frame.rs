use crate::camera::{CameraController, OrbitCamera};
use crate::renderer::{RenderError, RenderTarget};
use mosaic_scene::Scene;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Everything the render step touches, owned in one place.
pub struct FrameContext<T: RenderTarget> {
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub target: T,
}

impl<T: RenderTarget> FrameContext<T> {
    /// Seed the camera from the scene's rig and fit it to the target.
    pub fn new(scene: Scene, target: T) -> Self {
        let mut camera = OrbitCamera::from_rig(scene.camera());
        let (width, height) = target.size();
        camera.set_viewport(width, height);
        Self {
            scene,
            camera,
            target,
        }
    }

    /// React to a viewport change: camera aspect first, then the target.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        self.target.resize(width, height);
        tracing::debug!(width, height, aspect = self.camera.aspect, "viewport resized");
    }

    /// Advance the camera and draw one frame.
    pub fn frame(&mut self) -> Result<T::Output, RenderError> {
        self.camera.advance();
        self.target.render_frame(&self.scene, &self.camera)
    }
}

/// Requests that a running `FrameLoop` stop before its next frame.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of one loop iteration.
#[derive(Debug, PartialEq)]
pub enum FrameOutcome<O> {
    /// A frame was drawn; the host should schedule the next one.
    Rendered(O),
    /// Stop was requested; no frame was drawn.
    Stopped,
}

/// Cooperative render loop: render the current frame, then the host
/// requests the next, until stopped.
#[derive(Debug, Default)]
pub struct FrameLoop {
    stop: StopHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn run_frame<T: RenderTarget>(
        &mut self,
        ctx: &mut FrameContext<T>,
    ) -> Result<FrameOutcome<T::Output>, RenderError> {
        if self.stop.is_stopped() {
            return Ok(FrameOutcome::Stopped);
        }
        let output = ctx.frame()?;
        self.frames += 1;
        Ok(FrameOutcome::Rendered(output))
    }

    /// Drive up to `max_frames` frames back to back, returning the last
    /// output. Ends early if stopped.
    pub fn run_for<T: RenderTarget>(
        &mut self,
        ctx: &mut FrameContext<T>,
        max_frames: u64,
    ) -> Result<Option<T::Output>, RenderError> {
        let mut last = None;
        for _ in 0..max_frames {
            match self.run_frame(ctx)? {
                FrameOutcome::Rendered(output) => last = Some(output),
                FrameOutcome::Stopped => break,
            }
        }
        Ok(last)
    }
}
