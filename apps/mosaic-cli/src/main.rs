use clap::{Parser, Subcommand};
use mosaic_common::GridCoord;
use mosaic_palette::{OverrideTable, Palette};
use mosaic_render::{DebugTextRenderer, FrameContext, FrameLoop};
use mosaic_scene::{Centering, ConfigOverrides, MosaicConfig, Scene};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mosaic-cli", about = "CLI tool for mosaic operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Scene config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override table file (JSON); replaces the embedded art
    #[arg(long, global = true)]
    palette: Option<PathBuf>,

    /// Grid rows
    #[arg(long, global = true)]
    rows: Option<u32>,

    /// Grid columns
    #[arg(long, global = true)]
    cols: Option<u32>,

    /// Cube edge length
    #[arg(long, global = true)]
    cell_size: Option<f32>,

    /// Grid centering: offset or visited
    #[arg(long, global = true)]
    centering: Option<Centering>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene summary
    Info,
    /// Render the scene with the text renderer and print the last frame
    Dump {
        /// Number of frames to run
        #[arg(short, long, default_value = "1")]
        frames: u64,
        /// Viewport width
        #[arg(long, default_value = "800")]
        width: u32,
        /// Viewport height
        #[arg(long, default_value = "600")]
        height: u32,
    },
    /// Print the resolved color of one cell
    Resolve {
        row: u32,
        col: u32,
    },
    /// Write the embedded override table to a JSON file
    ExportPalette {
        out: PathBuf,
    },
    /// Check an override table file against the grid width
    ValidatePalette {
        table: PathBuf,
    },
    /// Write the effective config to a JSON file
    WriteConfig {
        out: PathBuf,
    },
}

impl Cli {
    fn mosaic_config(&self) -> anyhow::Result<MosaicConfig> {
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

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.mosaic_config()?;

    match &cli.command {
        Commands::Info => {
            let palette = config.load_palette()?;
            println!("mosaic-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "grid: {}x{} cell_size={} centering={:?} cells={}",
                config.grid.rows,
                config.grid.cols,
                config.grid.cell_size,
                config.grid.centering,
                config.grid.cell_count()
            );
            println!(
                "palette: base={} overrides={}",
                palette.base(),
                palette.override_count()
            );
        }
        Commands::Dump {
            frames,
            width,
            height,
        } => {
            let palette = config.load_palette()?;
            let scene = Scene::assemble(&config, &palette)?;
            let mut ctx = FrameContext::new(scene, DebugTextRenderer::new(*width, *height));
            let mut frame_loop = FrameLoop::new();
            if let Some(frame) = frame_loop.run_for(&mut ctx, *frames)? {
                print!("{frame}");
            }
            tracing::debug!(frames = frame_loop.frames(), "dump finished");
        }
        Commands::Resolve { row, col } => {
            let palette = config.load_palette()?;
            let coord = GridCoord::new(*row, *col);
            println!("{coord} -> {}", palette.resolve_color(coord));
        }
        Commands::ExportPalette { out } => {
            OverrideTable::builtin().save(out)?;
            println!("wrote embedded table to {}", out.display());
        }
        Commands::ValidatePalette { table } => {
            let loaded = OverrideTable::load(table)?;
            let palette = Palette::from_table(&loaded, config.grid.cols)?;
            println!(
                "OK: {} groups, {} entries, {} cells overridden",
                loaded.groups.len(),
                loaded.len(),
                palette.override_count()
            );
        }
        Commands::WriteConfig { out } => {
            config.save(out)?;
            println!("wrote config to {}", out.display());
        }
    }

    Ok(())
}
