//! Surface height resolution with cross-chunk correction.
//!
//! Callers address columns relative to the chunk they are painting, and may
//! step one column past its edge to look at a neighbour. Such coordinates are
//! moved into the chunk that actually owns the column before its heightmap is
//! read. Liquids and submerged plants are then peeled off so the height
//! describes the ground under any water.

use mappy_world::{Chunk, ChunkPos, Material, WorldPos, WorldView, CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Outcome of resolving one column's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceHeight {
    /// y of the first block that is neither liquid nor an underwater plant.
    Resolved(i32),
    /// The painted chunk is empty or the owning chunk is not loaded.
    Unavailable,
}

impl SurfaceHeight {
    /// The resolved height, or `fallback` when no data was available.
    pub fn or(self, fallback: i32) -> i32 {
        match self {
            SurfaceHeight::Resolved(y) => y,
            SurfaceHeight::Unavailable => fallback,
        }
    }

    /// The resolved height, if any.
    pub fn resolved(self) -> Option<i32> {
        match self {
            SurfaceHeight::Resolved(y) => Some(y),
            SurfaceHeight::Unavailable => None,
        }
    }
}

fn in_chunk(local_x: i32, local_z: i32) -> bool {
    (0..CHUNK_SIZE_X as i32).contains(&local_x) && (0..CHUNK_SIZE_Z as i32).contains(&local_z)
}

/// Resolve the ground height of the column at (`local_x`, `local_z`) relative
/// to `chunk`. Coordinates outside `[0, 16)` address the neighbouring chunk.
pub fn surface_height<W>(world: &W, chunk: &Chunk, local_x: i32, local_z: i32) -> SurfaceHeight
where
    W: WorldView + ?Sized,
{
    let origin = chunk.position();
    let column = WorldPos::new(origin.world_x(local_x), 0, origin.world_z(local_z));

    let target = if in_chunk(local_x, local_z) {
        Some(chunk)
    } else {
        world.chunk(ChunkPos::containing(column.x, column.z))
    };
    let Some(target) = target else {
        return SurfaceHeight::Unavailable;
    };
    if chunk.is_empty() || !world.is_chunk_loaded(target.position()) {
        return SurfaceHeight::Unavailable;
    }

    let (x, z) = column.local_column();
    let mut y = target.heightmap_top(x, z);
    loop {
        y -= 1;
        let material = world.block_at(column.with_y(y)).material();
        let submerged = material.is_liquid() || material == Material::UnderwaterPlant;
        if !submerged || y <= 0 {
            return SurfaceHeight::Resolved(y);
        }
    }
}

/// [`surface_height`], returning `start_y` unchanged when no data is available.
pub fn resolve_height<W>(world: &W, chunk: &Chunk, local_x: i32, start_y: i32, local_z: i32) -> i32
where
    W: WorldView + ?Sized,
{
    surface_height(world, chunk, local_x, local_z).or(start_y)
}
