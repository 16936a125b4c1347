//! Assembles chunk images into one picture and writes it out.

use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use mappy_core::PackedColor;
use mappy_map::ChunkImage;
use mappy_world::{ChunkPos, CHUNK_SIZE_X, CHUNK_SIZE_Z};
use std::path::Path;

use crate::region::region_side;

/// Composited RGBA8 pixels for a square region of chunks, north-up.
pub struct RegionPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RegionPixels {
    /// Lay out the images of a `radius` region; chunks without an image stay transparent.
    pub fn compose(radius: u32, images: &[ChunkImage]) -> Self {
        let side = region_side(radius);
        let width = side * CHUNK_SIZE_X;
        let height = side * CHUNK_SIZE_Z;
        let mut rgba = vec![0u8; width * height * 4];

        for image in images {
            let Some((chunk_col, chunk_row)) = grid_cell(image.position, radius, side) else {
                continue;
            };
            let pixels = image.composite();
            for z in 0..CHUNK_SIZE_Z {
                for x in 0..CHUNK_SIZE_X {
                    let px = chunk_col * CHUNK_SIZE_X + x;
                    let py = chunk_row * CHUNK_SIZE_Z + z;
                    let offset = (py * width + px) * 4;
                    let color: PackedColor = pixels[z * CHUNK_SIZE_X + x];
                    rgba[offset..offset + 4].copy_from_slice(&color.to_rgba8());
                }
            }
        }

        Self {
            width: width as u32,
            height: height as u32,
            rgba,
        }
    }
}

/// Column and row of a chunk in the region grid, `None` outside it.
fn grid_cell(position: ChunkPos, radius: u32, side: usize) -> Option<(usize, usize)> {
    let offset = |coord: i32| {
        usize::try_from(i64::from(coord) + i64::from(radius))
            .ok()
            .filter(|cell| *cell < side)
    };
    Some((offset(position.x)?, offset(position.z)?))
}

/// Write an RGBA8 image to disk as a PNG.
pub fn write_png(path: &Path, pixels: &RegionPixels) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create map output directory")?;
    }
    let file = std::fs::File::create(path).context("failed to create map png")?;
    let encoder = PngEncoder::new_with_quality(file, CompressionType::Fast, FilterType::NoFilter);
    encoder
        .write_image(
            &pixels.rgba,
            pixels.width,
            pixels.height,
            ColorType::Rgba8.into(),
        )
        .context("failed to write map png")?;
    Ok(())
}
