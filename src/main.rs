//! mappy - top-down voxel map renderer
//!
//! Headless executable: generates a seeded world, paints its map layer chunk
//! by chunk and writes the composited picture as a PNG.

mod config;
mod export;
mod region;

use anyhow::{Context, Result};
use config::{RenderConfig, DEFAULT_CONFIG_PATH};
use mappy_core::DimensionId;
use mappy_map::MapLayer;
use mappy_testkit::{ChunkMapMetric, MapMetricSink};
use mappy_world::TerrainGenerator;
use region::{generate_region, MapRegion};
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting mappy v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = RenderConfig::load_from_path(&config_path);
    cli.apply(&mut config);

    if cli.write_config {
        config
            .save_to_path(&config_path)
            .with_context(|| format!("failed to save config to {}", config_path.display()))?;
    }

    let generator = TerrainGenerator::new(config.world_seed, config.dimension);
    let mut world = generate_region(&generator, config.radius);
    let layer = MapLayer::for_dimension(config.dimension, config.viewer_y);

    let mut region = MapRegion::new();
    let images = region.repaint_dirty(&mut world, &config.map, layer);
    info!(chunks = images.len(), resident = region.len(), ?layer, "painted map");

    let pixels = export::RegionPixels::compose(config.radius, &images);
    export::write_png(&cli.out, &pixels)
        .with_context(|| format!("failed to write map to {}", cli.out.display()))?;
    info!(path = %cli.out.display(), width = pixels.width, height = pixels.height, "wrote map");

    if let Some(metrics_path) = &cli.metrics {
        let metrics: Vec<ChunkMapMetric> = images
            .iter()
            .map(|image| {
                ChunkMapMetric::from_pixels(image.position, image.cached_columns, &image.composite())
            })
            .collect();
        let mut sink = MapMetricSink::create(metrics_path)?;
        sink.write(&metrics)?;
    }

    Ok(())
}

struct CliOptions {
    config: Option<PathBuf>,
    write_config: bool,
    world_seed: Option<u64>,
    dimension: Option<DimensionId>,
    radius: Option<u32>,
    viewer_y: Option<i32>,
    no_shading: bool,
    out: PathBuf,
    metrics: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            write_config: false,
            world_seed: None,
            dimension: None,
            radius: None,
            viewer_y: None,
            no_shading: false,
            out: PathBuf::from("target/map.png"),
            metrics: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--write-config" => opts.write_config = true,
                "--world-seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.world_seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--world-seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--world-seed requires an integer");
                    }
                }
                "--dimension" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<DimensionId>() {
                            Ok(value) => opts.dimension = Some(value),
                            Err(err) => tracing::error!(%err, "--dimension is invalid"),
                        }
                    } else {
                        tracing::error!("--dimension requires overworld, nether or end");
                    }
                }
                "--radius" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u32>() {
                            Ok(value) => opts.radius = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--radius must be a non-negative integer");
                            }
                        }
                    } else {
                        tracing::error!("--radius requires an integer");
                    }
                }
                "--viewer-y" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<i32>() {
                            Ok(value) => opts.viewer_y = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--viewer-y must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--viewer-y requires an integer");
                    }
                }
                "--no-shading" => opts.no_shading = true,
                "--out" => {
                    if let Some(path) = args.next() {
                        opts.out = PathBuf::from(path);
                    } else {
                        tracing::error!("--out requires a file path");
                    }
                }
                "--metrics" => {
                    if let Some(path) = args.next() {
                        opts.metrics = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--metrics requires a file path");
                    }
                }
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
        }

        opts
    }

    /// Command-line values take precedence over the config file.
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(seed) = self.world_seed {
            config.world_seed = seed;
        }
        if let Some(dimension) = self.dimension {
            config.dimension = dimension;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(viewer_y) = self.viewer_y {
            config.viewer_y = viewer_y;
        }
        if self.no_shading {
            config.map.shading = false;
        }
    }
}
