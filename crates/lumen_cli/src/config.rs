//! Render job configuration: TOML job files overlaid by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{CameraSettings, RenderConfig};
use serde::Deserialize;

/// Render the demo sphere scene to an image file.
#[derive(Parser, Debug, Default)]
#[command(name = "lumen", version)]
pub struct Args {
    /// TOML job file with [render], [camera] and [scene] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output image (.ppm, or .png)
    #[arg(short, long, default_value = "output/final.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the sampling streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed for the procedural scene layout
    #[arg(long)]
    pub scene_seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Render on the main thread only
    #[arg(long)]
    pub serial: bool,
}

/// Settings for the procedural scene.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u64,
}

/// Everything needed to run one render.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderJob {
    pub render: RenderConfig,
    pub camera: CameraSettings,
    pub scene: SceneConfig,
}

impl RenderJob {
    /// Parse a job from TOML text. Missing tables and keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse render job")
    }

    /// Load a job file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid job file {}", path.display()))
    }

    /// Build the job for a command line: job file (if any), then flags.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut job = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        job.apply_args(args);
        Ok(job)
    }

    /// Override fields with any flags given on the command line.
    ///
    /// The camera aspect ratio always follows the final image size.
    pub fn apply_args(&mut self, args: &Args) {
        let render = &mut self.render;
        if let Some(width) = args.width {
            render.width = width;
        }
        if let Some(height) = args.height {
            render.height = height;
        }
        if let Some(samples) = args.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(max_depth) = args.max_depth {
            render.max_depth = max_depth;
        }
        if let Some(seed) = args.seed {
            render.seed = seed;
        }
        if let Some(scene_seed) = args.scene_seed {
            self.scene.seed = scene_seed;
        }

        self.camera.aspect_ratio = self.render.aspect_ratio();
    }
}
