use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use orb_renderer::{render, Framebuffer, RenderConfig, Scene};

/// Render the built-in sphere scene with a Monte Carlo path tracer.
#[derive(Debug, Parser)]
#[command(name = "orb", version, about, long_about = None)]
struct Args {
    /// JSON render config; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image path (.ppm is written as text PPM, other extensions via the image crate)
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Bucket edge length in pixels
    #[arg(long)]
    bucket_size: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Render without any spheres
    #[arg(long)]
    empty_scene: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Defaults, then the config file, then command line overrides.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(bucket_size) = self.bucket_size {
            config.bucket_size = bucket_size;
        }

        config.validate().context("Invalid render settings")?;
        Ok(config)
    }

    fn scene(&self) -> Scene {
        if self.empty_scene {
            Scene::new()
        } else {
            Scene::demo()
        }
    }
}

fn run(args: &Args) -> Result<Framebuffer> {
    let config = args.render_config()?;
    let camera = config.camera()?;
    let scene = args.scene();

    let image = match args.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker pool")?
            .install(|| render(&camera, &scene, &config))?,
        None => render(&camera, &scene, &config)?,
    };

    Ok(image)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("Starting Orb");

    let start = Instant::now();
    let image = run(&args)?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Finished {} in {:?}", args.output.display(), start.elapsed());
    Ok(())
}
