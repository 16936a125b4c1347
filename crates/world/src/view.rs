//! Read-only world access used by map sampling.

use crate::chunk::{Chunk, ChunkPos, Voxel, WorldPos, CHUNK_SIZE_Y};

/// Read access to the chunks of one dimension.
///
/// Implementors only need to hand out chunks and report load state; block
/// lookups default to reading through [`WorldView::chunk`].
pub trait WorldView {
    /// Resident chunk at `pos`, loaded or not.
    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk>;

    /// Whether the chunk at `pos` is loaded and its data current.
    fn is_chunk_loaded(&self, pos: ChunkPos) -> bool;

    /// Build height of the world. Valid block y values are `0..height()`.
    fn height(&self) -> i32 {
        CHUNK_SIZE_Y as i32
    }

    /// Block at a world position. Positions outside the build range or in
    /// missing chunks read as air.
    fn block_at(&self, pos: WorldPos) -> Voxel {
        if pos.y < 0 || pos.y >= self.height() {
            return Voxel::AIR;
        }
        let (x, z) = pos.local_column();
        self.chunk(pos.chunk())
            .map_or(Voxel::AIR, |chunk| chunk.voxel(x, pos.y as usize, z))
    }
}
