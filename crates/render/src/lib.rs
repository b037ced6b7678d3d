//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Render targets never mutate the scene.
//! - The camera is the only state that changes between frames.
//! - One thread owns the frame context; frames run to completion.

mod camera;
mod frame;
mod renderer;

pub use camera::{CameraController, OrbitCamera};
pub use frame::{FrameContext, FrameLoop, FrameOutcome, StopHandle};
pub use renderer::{DebugTextRenderer, RenderError, RenderTarget};
