//! Last painted pixel per column.

use mappy_core::PackedColor;
use mappy_world::{CHUNK_COLUMNS, CHUNK_SIZE_X, CHUNK_SIZE_Z};

use crate::surface::ColumnSample;

/// One cached color per column of a chunk.
///
/// Owned by the chunk's map state; a repaint pass is the only writer, so no
/// locking is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPixelCache {
    pixels: [PackedColor; CHUNK_COLUMNS],
}

impl Default for ChunkPixelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkPixelCache {
    /// A cache with every column transparent.
    pub fn new() -> Self {
        Self {
            pixels: [PackedColor::TRANSPARENT; CHUNK_COLUMNS],
        }
    }

    fn index(local_x: usize, local_z: usize) -> usize {
        debug_assert!(local_x < CHUNK_SIZE_X);
        debug_assert!(local_z < CHUNK_SIZE_Z);
        local_z * CHUNK_SIZE_X + local_x
    }

    /// The pixel last stored for a column, left untouched.
    pub fn cancel_update(&self, local_x: usize, local_z: usize) -> PackedColor {
        self.pixels[Self::index(local_x, local_z)]
    }

    /// Remember a freshly sampled pixel.
    pub fn store(&mut self, local_x: usize, local_z: usize, color: PackedColor) {
        self.pixels[Self::index(local_x, local_z)] = color;
    }

    /// Turn a sample into the pixel to draw, updating the slot for real colors.
    pub fn resolve(&mut self, local_x: usize, local_z: usize, sample: ColumnSample) -> PackedColor {
        let color = match sample {
            ColumnSample::Color(color) => color,
            ColumnSample::NoSurface => PackedColor::BLACK,
            ColumnSample::UseCache => return self.cancel_update(local_x, local_z),
        };
        self.store(local_x, local_z, color);
        color
    }

    /// All cached pixels, row by row (z-major).
    pub fn pixels(&self) -> &[PackedColor] {
        &self.pixels
    }
}
