#![warn(missing_docs)]
//! Testing surfaces: hand-built fixture worlds and map metric sinks.

mod fixture;

use anyhow::Result;
use mappy_core::PackedColor;
use mappy_world::ChunkPos;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use fixture::*;

/// Pixel metric snapshot for one repainted chunk.
#[derive(Debug, Serialize)]
pub struct ChunkMapMetric {
    /// Chunk coordinates [x, z].
    pub chunk: [i32; 2],
    /// Columns that reused the cached pixel during the last pass.
    pub cached_columns: usize,
    /// Hash (hex string) of the composited pixels for deterministic comparisons.
    pub hash: String,
}

impl ChunkMapMetric {
    /// Build a metric by hashing `pixels` in column order.
    pub fn from_pixels(pos: ChunkPos, cached_columns: usize, pixels: &[PackedColor]) -> Self {
        Self {
            chunk: [pos.x, pos.z],
            cached_columns,
            hash: pixel_hash(pixels),
        }
    }
}

/// Stable blake3 hex digest of a pixel buffer.
pub fn pixel_hash(pixels: &[PackedColor]) -> String {
    let mut hasher = blake3::Hasher::new();
    for pixel in pixels {
        hasher.update(&pixel.0.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Writes chunk map metrics to JSON for CI artifacts.
pub struct MapMetricSink {
    file: File,
}

impl MapMetricSink {
    /// Create a sink pointed at the supplied path, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Persist the provided metrics as pretty JSON.
    pub fn write(&mut self, metrics: &[ChunkMapMetric]) -> Result<()> {
        let json = serde_json::to_string_pretty(metrics)?;
        self.file.write_all(json.as_bytes())?;
        Ok(())
    }
}
