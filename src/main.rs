mod logging;
mod sim;
mod util;

use anyhow::{Context, Result};
use cellgrid::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use cellgrid::{MemorySurface, Renderer, RendererConfig, Surface};
use clap::Parser;
use sim::World;
use tracing::info;
use util::FpsCounter;

/// Random-walk life simulation drawn with the incremental cell renderer
#[derive(Debug, Parser)]
#[command(name = "cellgrid", version)]
struct Args {
    /// Surface width in pixels
    #[arg(long, short = 'W', default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, short = 'H', default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Cell edge in pixels (overrides the config file)
    #[arg(long)]
    cell_size: Option<u32>,

    /// Renderer config (JSON)
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,

    /// Ticks to simulate (0 = until the window closes)
    #[arg(long, short, default_value_t = 500)]
    ticks: u64,

    /// Number of critters
    #[arg(long, default_value_t = 12)]
    critters: usize,

    /// Ticks before the highlight moves to the next critter
    #[arg(long, default_value_t = 50)]
    highlight_every: u64,

    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Open an SDL window instead of rendering headless
    #[cfg(feature = "sdl")]
    #[arg(long)]
    window: bool,

    #[cfg(feature = "sdl")]
    #[arg(long)]
    no_vsync: bool,
}

fn load_config(args: &Args) -> Result<RendererConfig> {
    let mut config = match &args.config {
        Some(path) => RendererConfig::load(path)
            .with_context(|| format!("loading renderer config {}", path.display()))?,
        None => RendererConfig::default(),
    };
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }
    Ok(config)
}

/// One simulation tick in the order the renderer expects:
/// changes, highlight bookkeeping, base pass, highlight pass.
fn tick<S: Surface>(
    renderer: &mut Renderer<S>,
    world: &mut World,
    n: u64,
    highlight_every: u64,
) -> Result<(usize, usize)> {
    world.step(renderer);

    // The selected critter moves every tick, so its highlight is rebuilt
    renderer.clear_all_highlights(true)?;
    if !world.critters().is_empty() {
        let selected = (n / highlight_every.max(1)) as usize % world.critters().len();
        renderer.highlight_organism(&world.critters()[selected]);
    }

    let drawn = renderer.render_cells()?;
    let highlighted = renderer.render_highlights()?;
    Ok((drawn, highlighted))
}

fn run_headless(args: &Args, config: &RendererConfig) -> Result<()> {
    let surface = MemorySurface::new(args.width, args.height);
    let mut renderer = Renderer::new(surface, config).context("creating renderer")?;
    let (cols, rows) = renderer.grid_size();
    let mut world = World::new(cols, rows, args.critters, args.seed);

    renderer.clear()?;
    renderer.render_full_grid(world.grid())?;

    let mut fps = FpsCounter::new(60);
    let mut total_drawn = 0usize;
    for n in 0..args.ticks {
        let (drawn, _) = tick(&mut renderer, &mut world, n, args.highlight_every)?;
        total_drawn += drawn;
        fps.tick();
    }

    info!(
        ticks = args.ticks,
        cells_drawn = total_drawn,
        presents = renderer.surface().present_count(),
        avg_ms = fps.avg_frame_time_ms(),
        "headless run finished"
    );
    Ok(())
}

#[cfg(feature = "sdl")]
fn run_window(args: &Args, config: &RendererConfig) -> Result<()> {
    use cellgrid::display::{SdlSurface, SdlWindow};

    let (window, texture_creator) =
        SdlWindow::open("cellgrid", args.width, args.height, !args.no_vsync)?;
    let surface = SdlSurface::new(window, &texture_creator)?;
    let mut renderer = Renderer::new(surface, config).context("creating renderer")?;
    let (cols, rows) = renderer.grid_size();
    let mut world = World::new(cols, rows, args.critters, args.seed);

    renderer.clear()?;
    renderer.render_full_grid(world.grid())?;

    let mut fps = FpsCounter::new(60);
    let mut n = 0u64;
    while args.ticks == 0 || n < args.ticks {
        if renderer.surface_mut().quit_requested() {
            break;
        }
        tick(&mut renderer, &mut world, n, args.highlight_every)?;
        let avg_fps = fps.tick();
        if n % 300 == 0 {
            info!(tick = n, fps = avg_fps as u32, "running");
        }
        n += 1;
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    info!(
        width = args.width,
        height = args.height,
        cell_size = config.cell_size,
        "=== cellgrid ==="
    );

    #[cfg(feature = "sdl")]
    if args.window {
        return run_window(&args, &config);
    }

    run_headless(&args, &config)
}
