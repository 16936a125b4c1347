//! Hand-built worlds for sampling tests.
//!
//! Columns are described bottom-up in world coordinates, so a test can put a
//! single water layer over stone, or give two neighbouring chunks different
//! ground heights, without going through terrain generation.

use mappy_world::{
    BlockId, Chunk, ChunkPos, ChunkStorage, Voxel, WorldPos, WorldView, CHUNK_SIZE_X,
    CHUNK_SIZE_Z,
};

/// A world assembled column by column.
pub struct ColumnWorld {
    storage: ChunkStorage,
}

impl Default for ColumnWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnWorld {
    /// An empty world with room for plenty of chunks.
    pub fn new() -> Self {
        Self {
            storage: ChunkStorage::new(64),
        }
    }

    /// Place one block.
    pub fn set(&mut self, pos: WorldPos, id: BlockId) -> &mut Self {
        let (x, z) = pos.local_column();
        self.storage
            .ensure_chunk(pos.chunk())
            .set_voxel(x, pos.y as usize, z, Voxel::of(id));
        self
    }

    /// Start stacking blocks in the world column (`x`, `z`) from `y = 0`.
    pub fn column(&mut self, x: i32, z: i32) -> ColumnBuilder<'_> {
        ColumnBuilder {
            world: self,
            x,
            z,
            next_y: 0,
        }
    }

    /// Fill every column of a chunk with `id` from `y = 0` up to `top_y` inclusive.
    pub fn flat_chunk(&mut self, pos: ChunkPos, top_y: i32, id: BlockId) -> &mut Self {
        let chunk = self.storage.ensure_chunk(pos);
        for z in 0..CHUNK_SIZE_Z {
            for x in 0..CHUNK_SIZE_X {
                for y in 0..=top_y {
                    chunk.set_voxel(x, y as usize, z, Voxel::of(id));
                }
            }
        }
        self
    }

    /// Make sure a (possibly all-air) chunk is resident and loaded.
    pub fn touch_chunk(&mut self, pos: ChunkPos) -> &mut Self {
        self.storage.ensure_chunk(pos);
        self
    }

    /// Keep the chunk resident but report it as not loaded.
    pub fn unload(&mut self, pos: ChunkPos) -> &mut Self {
        self.storage.set_loaded(pos, false);
        self
    }

    /// Borrow a resident chunk.
    ///
    /// # Panics
    /// Panics if the chunk was never touched by the fixture.
    pub fn chunk_at(&self, pos: ChunkPos) -> &Chunk {
        self.storage
            .get(pos)
            .unwrap_or_else(|| panic!("fixture chunk {pos} not built"))
    }

    /// Mutable access to a resident chunk.
    pub fn chunk_mut(&mut self, pos: ChunkPos) -> &mut Chunk {
        self.storage.ensure_chunk(pos)
    }
}

impl WorldView for ColumnWorld {
    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.storage.chunk(pos)
    }

    fn is_chunk_loaded(&self, pos: ChunkPos) -> bool {
        self.storage.is_chunk_loaded(pos)
    }
}

/// Stacks blocks upward in one world column.
pub struct ColumnBuilder<'a> {
    world: &'a mut ColumnWorld,
    x: i32,
    z: i32,
    next_y: i32,
}

impl ColumnBuilder<'_> {
    /// Append `count` blocks of `id`.
    pub fn layer(mut self, id: BlockId, count: i32) -> Self {
        for _ in 0..count {
            self.world
                .set(WorldPos::new(self.x, self.next_y, self.z), id);
            self.next_y += 1;
        }
        self
    }

    /// Append a single block.
    pub fn block(self, id: BlockId) -> Self {
        self.layer(id, 1)
    }

    /// Skip `count` blocks, leaving them as they are.
    pub fn gap(mut self, count: i32) -> Self {
        self.next_y += count;
        self
    }

    /// y the next appended block would land on.
    pub fn next_y(&self) -> i32 {
        self.next_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mappy_world::{BLOCK_STONE, BLOCK_WATER};

    #[test]
    fn columns_stack_bottom_up() {
        let mut world = ColumnWorld::new();
        let next = world
            .column(-3, 5)
            .layer(BLOCK_STONE, 10)
            .block(BLOCK_WATER)
            .next_y();
        assert_eq!(next, 11);
        assert_eq!(world.block_at(WorldPos::new(-3, 9, 5)).id, BLOCK_STONE);
        assert_eq!(world.block_at(WorldPos::new(-3, 10, 5)).id, BLOCK_WATER);
        let chunk = world.chunk_at(ChunkPos::new(-1, 0));
        assert_eq!(chunk.heightmap_top(13, 5), 11);
    }

    #[test]
    fn unloaded_chunks_stay_resident() {
        let mut world = ColumnWorld::new();
        let pos = ChunkPos::new(2, 2);
        world.flat_chunk(pos, 3, BLOCK_STONE).unload(pos);
        assert!(world.chunk(pos).is_some());
        assert!(!world.is_chunk_loaded(pos));
    }
}
