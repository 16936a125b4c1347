//! Relief shading overlay.
//!
//! Light comes from the top-left corner of the map: columns whose eastern
//! neighbour is higher, or whose southern (z - 1) neighbour is lower, face the
//! light. The overlay carries its strength in the alpha byte and is meant to be
//! composited over the color layer.

use std::num::NonZeroU32;

use mappy_core::PackedColor;
use mappy_world::{Chunk, WorldView};

use crate::height::resolve_height;

/// Tint of slopes facing the light.
pub const LIGHT_TINT: u32 = 0xDDDDDD;
/// Tint of slopes facing away from the light.
pub const DARK_TINT: u32 = 0x222222;

/// Shade the column at (`local_x`, `local_z`) of `chunk` from its own height
/// and those of its east and south neighbours.
pub fn shade_column<W>(
    world: &W,
    chunk: &Chunk,
    local_x: i32,
    local_z: i32,
    max_difference: NonZeroU32,
) -> PackedColor
where
    W: WorldView + ?Sized,
{
    let here = resolve_height(world, chunk, local_x, -1, local_z);
    let east = resolve_height(world, chunk, local_x + 1, here, local_z);
    let south = resolve_height(world, chunk, local_x, here, local_z - 1);
    relief(here, east, south, max_difference)
}

/// Overlay color for a column at height `here` with the given neighbour heights.
pub fn relief(here: i32, east: i32, south: i32, max_difference: NonZeroU32) -> PackedColor {
    let diff_east = east - here;
    let diff_south = -(south - here);
    let diff = diff_east + diff_south;

    let tint = if diff < 0 { DARK_TINT } else { LIGHT_TINT };
    let max = max_difference.get();
    let magnitude = diff.unsigned_abs().min(max);
    let intensity = (255.0 * f64::from(magnitude) / f64::from(max)).round() as u8;

    PackedColor::opaque(tint).with_alpha(intensity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mappy_testkit::ColumnWorld;
    use mappy_world::{ChunkPos, BLOCK_STONE};

    fn max(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn flat_ground_has_no_shading() {
        let color = relief(64, 64, 64, max(5));
        assert_eq!(color.alpha(), 0);
        assert_eq!(color.rgb(), LIGHT_TINT);
    }

    #[test]
    fn rising_east_saturates_light() {
        let color = relief(64, 69, 64, max(5));
        assert_eq!(color.alpha(), 255);
        assert_eq!(color.rgb(), LIGHT_TINT);
    }

    #[test]
    fn falling_east_saturates_dark() {
        let color = relief(64, 59, 64, max(5));
        assert_eq!(color.alpha(), 255);
        assert_eq!(color.rgb(), DARK_TINT);
    }

    #[test]
    fn south_neighbour_counts_inverted() {
        // A higher southern neighbour faces away from the light.
        let color = relief(64, 64, 66, max(4));
        assert_eq!(color.rgb(), DARK_TINT);
        assert_eq!(color.alpha(), 128);
    }

    #[test]
    fn opposing_slopes_cancel() {
        let color = relief(64, 67, 67, max(5));
        assert_eq!(color.alpha(), 0);
        assert_eq!(color.rgb(), LIGHT_TINT);
    }

    #[test]
    fn intensity_rounds_to_nearest() {
        // 255 * 1 / 3 = 85.0, 255 * 2 / 3 = 170.0, 255 * 1 / 7 = 36.43
        assert_eq!(relief(0, 1, 0, max(3)).alpha(), 85);
        assert_eq!(relief(0, 2, 0, max(3)).alpha(), 170);
        assert_eq!(relief(0, 1, 0, max(7)).alpha(), 36);
        assert_eq!(relief(0, 4, 0, max(7)).alpha(), 146);
    }

    #[test]
    fn shade_column_reads_neighbour_chunks() {
        let mut world = ColumnWorld::new();
        world
            .flat_chunk(ChunkPos::new(0, 0), 20, BLOCK_STONE)
            .flat_chunk(ChunkPos::new(1, 0), 25, BLOCK_STONE)
            .flat_chunk(ChunkPos::new(0, -1), 20, BLOCK_STONE);
        let chunk = world.chunk_at(ChunkPos::new(0, 0));

        let edge = shade_column(&world, chunk, 15, 0, max(5));
        assert_eq!(edge.alpha(), 255);
        assert_eq!(edge.rgb(), LIGHT_TINT);

        let inner = shade_column(&world, chunk, 7, 0, max(5));
        assert_eq!(inner.alpha(), 0);
    }

    #[test]
    fn unavailable_neighbours_fall_back_to_centre_height() {
        let mut world = ColumnWorld::new();
        world.flat_chunk(ChunkPos::new(0, 0), 20, BLOCK_STONE);
        let chunk = world.chunk_at(ChunkPos::new(0, 0));
        // Neither the east nor the z - 1 neighbour chunk exists.
        let color = shade_column(&world, chunk, 15, 0, max(5));
        assert_eq!(color.alpha(), 0);
        assert_eq!(color.rgb(), LIGHT_TINT);
    }
}
