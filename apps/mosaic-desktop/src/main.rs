use anyhow::Result;
use clap::Parser;
use mosaic_render::{FrameContext, FrameLoop, FrameOutcome, RenderTarget};
use mosaic_render_wgpu::WgpuTarget;
use mosaic_scene::{Centering, ConfigOverrides, MosaicConfig, Scene};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "mosaic-desktop", about = "Render the pixel mosaic in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override table file (JSON); replaces the embedded art
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Grid rows (row 0 and the last row are not drawn)
    #[arg(long)]
    rows: Option<u32>,

    /// Grid columns (column 0 and the last column are not drawn)
    #[arg(long)]
    cols: Option<u32>,

    /// Cube edge length
    #[arg(long)]
    cell_size: Option<f32>,

    /// Grid centering: offset or visited
    #[arg(long)]
    centering: Option<Centering>,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,
}

impl Cli {
    fn mosaic_config(&self) -> Result<MosaicConfig> {
        let overrides = ConfigOverrides {
            palette: self.palette.clone(),
            rows: self.rows,
            cols: self.cols,
            cell_size: self.cell_size,
            centering: self.centering,
        };
        Ok(MosaicConfig::resolve(self.config.as_deref(), overrides)?)
    }
}

/// Orbit input state between pointer events.
#[derive(Default)]
struct Pointer {
    dragging: bool,
    last: Option<PhysicalPosition<f64>>,
}

struct MosaicApp {
    scene: Option<Scene>,
    window_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    ctx: Option<FrameContext<WgpuTarget>>,
    frames: FrameLoop,
    pointer: Pointer,
    init_error: Option<anyhow::Error>,
}

impl MosaicApp {
    fn new(scene: Scene, width: u32, height: u32) -> Self {
        Self {
            scene: Some(scene),
            window_size: PhysicalSize::new(width, height),
            window: None,
            ctx: None,
            frames: FrameLoop::new(),
            pointer: Pointer::default(),
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Pixel Mosaic")
            .with_inner_size(self.window_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let target = WgpuTarget::new(window.clone(), size.width, size.height)?;
        let scene = self
            .scene
            .take()
            .ok_or_else(|| anyhow::anyhow!("scene already handed to the renderer"))?;

        self.ctx = Some(FrameContext::new(scene, target));
        self.window = Some(window);
        Ok(())
    }

    fn handle_pointer(&mut self, position: PhysicalPosition<f64>) {
        if let (true, Some(last), Some(ctx)) =
            (self.pointer.dragging, self.pointer.last, &mut self.ctx)
        {
            let dx = (position.x - last.x) as f32;
            let dy = (position.y - last.y) as f32;
            ctx.camera.rotate(dx, dy);
        }
        self.pointer.last = Some(position);
    }
}

impl ApplicationHandler for MosaicApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to initialize renderer: {e}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.frames.stop_handle().stop();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.frames.stop_handle().stop();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(ctx) = &mut self.ctx {
                    ctx.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.pointer.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_pointer(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                if let Some(ctx) = &mut self.ctx {
                    ctx.camera.zoom(amount);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(ctx) = &mut self.ctx else {
                    return;
                };
                match self.frames.run_frame(ctx) {
                    Ok(FrameOutcome::Rendered(())) => {}
                    Ok(FrameOutcome::Stopped) => {
                        tracing::info!(
                            frames = self.frames.frames(),
                            "render loop stopped"
                        );
                        event_loop.exit();
                        return;
                    }
                    Err(e) => {
                        tracing::error!("render error: {e}");
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frames.is_running() {
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("mosaic-desktop starting");

    let config = cli.mosaic_config()?;
    let palette = config.load_palette()?;
    let scene = Scene::assemble(&config, &palette)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = MosaicApp::new(scene, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error {
        return Err(e);
    }
    if let Some(ctx) = &app.ctx {
        let (width, height) = ctx.target.size();
        tracing::info!(
            frames = app.frames.frames(),
            "exiting from {width}x{height} on {}",
            ctx.target.backend()
        );
    }
    Ok(())
}
