//! `lumen` - render the demo sphere scene to an image file.

mod config;
mod output;
mod scene;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render, render_parallel, Camera};

use crate::config::{Args, RenderJob};
use crate::scene::DemoScene;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let job = RenderJob::from_args(&args)?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let start = Instant::now();
    let scene = DemoScene::random(job.scene.seed);
    let world = scene.world();
    log::info!(
        "Scene built in {:?}: {} spheres",
        start.elapsed(),
        scene.sphere_count()
    );

    let camera = Camera::new(&job.camera).context("Invalid camera settings")?;

    let image = if args.serial {
        render(&camera, &world, &job.render)
    } else {
        render_parallel(&camera, &world, &job.render)
    };

    output::write_image(&args.output, &image)?;
    Ok(())
}
