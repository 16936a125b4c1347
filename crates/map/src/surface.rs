//! Top-down surface colors.

use mappy_core::PackedColor;
use mappy_world::{Chunk, MapColor, MapShade, Voxel, WorldPos, WorldView, BLOCK_SNOW};

/// Brightness every sampled block is rendered with.
pub const SURFACE_SHADE: MapShade = MapShade::Normal;

/// Result of sampling one column's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSample {
    /// A freshly sampled opaque color.
    Color(PackedColor),
    /// The heightmap pointed at air; reuse the column's cached pixel.
    UseCache,
    /// A cave scan left the world without crossing a surface.
    NoSurface,
}

impl ColumnSample {
    /// The sampled color, if this is a fresh sample.
    pub fn color(self) -> Option<PackedColor> {
        match self {
            ColumnSample::Color(color) => Some(color),
            _ => None,
        }
    }
}

/// Opaque map color of a block.
pub fn block_color(voxel: Voxel) -> PackedColor {
    MapColor::of(voxel.id).render_color(SURFACE_SHADE)
}

/// Sample the block right under the heightmap top of a column.
///
/// This deliberately skips the liquid correction of the height resolver: the
/// map shows water where there is water.
///
/// # Panics
/// Panics if `local_x` or `local_z` is outside `[0, 16)`.
pub fn sample_top_color<W>(world: &W, chunk: &Chunk, local_x: usize, local_z: usize) -> ColumnSample
where
    W: WorldView + ?Sized,
{
    let origin = chunk.position();
    let pos = WorldPos::new(
        origin.world_x(local_x as i32),
        chunk.heightmap_top(local_x, local_z) - 1,
        origin.world_z(local_z as i32),
    );

    let block = world.block_at(pos);
    if block.is_air() {
        return ColumnSample::UseCache;
    }
    if world.block_at(pos.up()).id == BLOCK_SNOW {
        return ColumnSample::Color(PackedColor::WHITE);
    }
    ColumnSample::Color(block_color(block))
}
