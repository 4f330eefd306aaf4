mod cli;
mod logger;

use anyhow::{ Context, Result };
use clap::Parser;
use log::info;

use brute_tracer::render::{ render, RenderConfig };
use brute_tracer::scene::Scene;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut scene = match args.scene {
        Some(ref path) => Scene::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => Scene::sphere_grid(args.grid_size, args.width, args.height)
            .context("failed to build sphere grid")?,
    };

    if let Some(depth) = args.depth {
        scene.world.recursion_depth = depth;
    }

    let config = RenderConfig {
        workers: args.workers,
        rows_per_chunk: args.rows_per_chunk,
    };

    let canvas = render(&scene.world, &scene.camera, &config)
        .context("render failed")?;

    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("Saved render to {}", args.output.display());

    Ok(())
}
