//! Ember command line renderer.
//!
//! Loads a scene description, renders it with the path tracer, and
//! writes the image. Exits non-zero with a descriptive message when the
//! scene cannot be loaded or the image cannot be written.

mod fpu;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ember_renderer::{JsonSink, MeshEngine, NullSink, PathSink, Renderer};

/// Offline Monte Carlo path tracer.
#[derive(Parser)]
#[command(name = "ember", version)]
struct Args {
    /// Scene description (.json, with a .bin buffer sidecar next to it)
    scene: PathBuf,

    /// Output image; .exr stores float radiance, other formats get a
    /// gamma-corrected 8-bit conversion
    output: PathBuf,

    /// Override the scene's samples per pixel
    #[arg(long)]
    spp: Option<u32>,

    /// Override the scene's bounce budget
    #[arg(long)]
    bounces: Option<u32>,

    /// Override the worker thread count
    #[arg(long)]
    threads: Option<usize>,

    /// Base sampler seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Record traced paths as JSON lines into this directory
    #[arg(long)]
    record: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    fpu::flush_denormals();

    let mut scene = ember_core::load_scene(&args.scene)
        .with_context(|| format!("failed to load scene \"{}\"", args.scene.display()))?;

    if let Some(spp) = args.spp {
        anyhow::ensure!(spp > 0, "--spp must be at least 1");
        scene.settings.spp = spp;
    }
    if let Some(bounces) = args.bounces {
        scene.settings.bounces = bounces;
    }
    if let Some(threads) = args.threads {
        scene.settings.threads = Some(threads);
    }
    if let Some(seed) = args.seed {
        scene.settings.seed = Some(seed);
    }

    let engine = MeshEngine::new(&scene.geometries);
    let sink: Box<dyn PathSink> = match &args.record {
        Some(dir) => Box::new(JsonSink::new(dir)),
        None => Box::new(NullSink),
    };

    let renderer = Renderer::new(&scene, &engine, sink);
    let start = Instant::now();
    let image = renderer.render();
    log::info!("Rendered in {:.2?}", start.elapsed());

    image
        .save(&args.output)
        .with_context(|| format!("failed to write image \"{}\"", args.output.display()))?;
    log::info!("Wrote \"{}\"", args.output.display());

    Ok(())
}
