use std::fmt;

use crate::blocks::{Material, BLOCK_AIR};
use crate::heightmap::Heightmap;

/// Chunk width (X axis) in voxels.
pub const CHUNK_SIZE_X: usize = 16;
/// Chunk height (Y axis) in voxels.
pub const CHUNK_SIZE_Y: usize = 256;
/// Chunk depth (Z axis) in voxels.
pub const CHUNK_SIZE_Z: usize = 16;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;
/// Number of columns in one chunk.
pub const CHUNK_COLUMNS: usize = CHUNK_SIZE_X * CHUNK_SIZE_Z;

/// Block identifier referencing the block table.
pub type BlockId = u16;
/// Block state metadata bits.
pub type BlockState = u16;

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    /// Convert to a linear index within the voxel array.
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE_X);
        debug_assert!(self.y < CHUNK_SIZE_Y);
        debug_assert!(self.z < CHUNK_SIZE_Z);
        (self.y * CHUNK_SIZE_Z + self.z) * CHUNK_SIZE_X + self.x
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk holding the world column (`world_x`, `world_z`).
    pub const fn containing(world_x: i32, world_z: i32) -> Self {
        Self {
            x: world_x.div_euclid(CHUNK_SIZE_X as i32),
            z: world_z.div_euclid(CHUNK_SIZE_Z as i32),
        }
    }

    /// World X of a chunk-relative column. `local_x` may fall outside the chunk.
    pub const fn world_x(self, local_x: i32) -> i32 {
        self.x * CHUNK_SIZE_X as i32 + local_x
    }

    /// World Z of a chunk-relative column. `local_z` may fall outside the chunk.
    pub const fn world_z(self, local_z: i32) -> i32 {
        self.z * CHUNK_SIZE_Z as i32 + local_z
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Absolute block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WorldPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block directly above.
    pub const fn up(self) -> Self {
        self.with_y(self.y + 1)
    }

    /// The block directly below.
    pub const fn down(self) -> Self {
        self.with_y(self.y - 1)
    }

    pub const fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::containing(self.x, self.z)
    }

    /// Column coordinates inside the owning chunk, wrapped into `[0, 16)`.
    pub const fn local_column(self) -> (usize, usize) {
        (
            self.x.rem_euclid(CHUNK_SIZE_X as i32) as usize,
            self.z.rem_euclid(CHUNK_SIZE_Z as i32) as usize,
        )
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Per-voxel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Voxel {
    pub id: BlockId,
    pub state: BlockState,
}

impl Voxel {
    pub const AIR: Self = Self::of(BLOCK_AIR);

    pub const fn of(id: BlockId) -> Self {
        Self { id, state: 0 }
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == BLOCK_AIR
    }

    #[inline]
    pub fn material(&self) -> Material {
        Material::of(self.id)
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever chunk data changes.
    pub struct DirtyFlags: u8 {
        const MAP = 0b0000_0001;
        const HEIGHTMAP = 0b0000_0010;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// Chunk storing voxel data, its motion-blocking heightmap and dirty flags.
pub struct Chunk {
    position: ChunkPos,
    voxels: Vec<Voxel>,
    heightmap: Heightmap,
    non_air: usize,
    dirty: DirtyFlags,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            voxels: vec![Voxel::default(); CHUNK_VOLUME],
            heightmap: Heightmap::new(),
            non_air: 0,
            dirty: DirtyFlags::all(),
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    fn index(x: usize, y: usize, z: usize) -> usize {
        LocalPos { x, y, z }.index()
    }

    /// Fetch a voxel copy.
    pub fn voxel(&self, x: usize, y: usize, z: usize) -> Voxel {
        let idx = Self::index(x, y, z);
        self.voxels[idx]
    }

    /// Set a voxel, keep the heightmap current and mark the relevant dirty flags.
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) {
        let idx = Self::index(x, y, z);
        let previous = self.voxels[idx];
        if previous == voxel {
            return;
        }
        self.voxels[idx] = voxel;
        match (previous.is_air(), voxel.is_air()) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
        self.dirty.insert(DirtyFlags::MAP);

        let top = self.heightmap.get(x, z);
        let y_above = y as i32 + 1;
        let new_top = if voxel.material().blocks_motion() {
            top.max(y_above)
        } else if y_above == top {
            self.scan_motion_blocking(x, y, z)
        } else {
            top
        };
        if new_top != top {
            self.heightmap.set(x, z, new_top);
            self.dirty.insert(DirtyFlags::HEIGHTMAP);
        }
    }

    /// Walk down from below `y` to the next motion-blocking block.
    fn scan_motion_blocking(&self, x: usize, y: usize, z: usize) -> i32 {
        (0..y)
            .rev()
            .find(|&below| self.voxel(x, below, z).material().blocks_motion())
            .map_or(0, |below| below as i32 + 1)
    }

    /// Motion-blocking heightmap.
    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    /// One above the highest motion-blocking block in the column, 0 when none.
    #[inline]
    pub fn heightmap_top(&self, x: usize, z: usize) -> i32 {
        self.heightmap.get(x, z)
    }

    /// True while the chunk holds nothing but air.
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }

    /// Consume only the given dirty flags, leaving the others pending.
    pub fn take_dirty(&mut self, flags: DirtyFlags) -> DirtyFlags {
        let taken = self.dirty & flags;
        self.dirty.remove(flags);
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BLOCK_SEAGRASS, BLOCK_SNOW, BLOCK_STONE, BLOCK_TALL_GRASS, BLOCK_WATER};

    #[test]
    fn set_and_get_voxel_marks_dirty() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        assert!(chunk.take_dirty_flags().contains(DirtyFlags::MAP));
        chunk.set_voxel(1, 2, 3, Voxel::of(BLOCK_STONE));
        assert_eq!(chunk.voxel(1, 2, 3).id, BLOCK_STONE);
        let flags = chunk.take_dirty_flags();
        assert!(flags.contains(DirtyFlags::MAP));
        assert!(flags.contains(DirtyFlags::HEIGHTMAP));
    }

    #[test]
    fn test_local_pos_index() {
        let pos1 = LocalPos { x: 0, y: 0, z: 0 };
        assert_eq!(pos1.index(), 0);

        let pos2 = LocalPos { x: 15, y: 0, z: 0 };
        assert_eq!(pos2.index(), 15);

        let pos3 = LocalPos { x: 0, y: 1, z: 0 };
        assert_eq!(pos3.index(), CHUNK_SIZE_Z * CHUNK_SIZE_X);
    }

    #[test]
    fn test_chunk_pos_display() {
        assert_eq!(format!("{}", ChunkPos::new(5, -3)), "(5, -3)");
    }

    #[test]
    fn chunk_pos_containing_floors_negatives() {
        assert_eq!(ChunkPos::containing(0, 15), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(-1, 16), ChunkPos::new(-1, 1));
        assert_eq!(ChunkPos::containing(-16, -17), ChunkPos::new(-1, -2));
    }

    #[test]
    fn world_pos_local_column_wraps() {
        assert_eq!(WorldPos::new(-1, 0, 16).local_column(), (15, 0));
        assert_eq!(WorldPos::new(33, 0, -33).local_column(), (1, 15));
    }

    #[test]
    fn heightmap_tracks_highest_motion_blocking() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        assert_eq!(chunk.heightmap_top(4, 4), 0);

        chunk.set_voxel(4, 60, 4, Voxel::of(BLOCK_STONE));
        assert_eq!(chunk.heightmap_top(4, 4), 61);

        chunk.set_voxel(4, 61, 4, Voxel::of(BLOCK_WATER));
        chunk.set_voxel(4, 62, 4, Voxel::of(BLOCK_SEAGRASS));
        assert_eq!(chunk.heightmap_top(4, 4), 63);

        // Plants and snow layers do not block motion.
        chunk.set_voxel(4, 63, 4, Voxel::of(BLOCK_TALL_GRASS));
        chunk.set_voxel(4, 64, 4, Voxel::of(BLOCK_SNOW));
        assert_eq!(chunk.heightmap_top(4, 4), 63);
    }

    #[test]
    fn removing_top_block_rescans_column() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_voxel(0, 10, 0, Voxel::of(BLOCK_STONE));
        chunk.set_voxel(0, 20, 0, Voxel::of(BLOCK_STONE));
        assert_eq!(chunk.heightmap_top(0, 0), 21);

        chunk.set_voxel(0, 20, 0, Voxel::AIR);
        assert_eq!(chunk.heightmap_top(0, 0), 11);

        chunk.set_voxel(0, 10, 0, Voxel::AIR);
        assert_eq!(chunk.heightmap_top(0, 0), 0);
    }

    #[test]
    fn empty_tracks_non_air_blocks() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        assert!(chunk.is_empty());
        chunk.set_voxel(3, 3, 3, Voxel::of(BLOCK_STONE));
        assert!(!chunk.is_empty());
        chunk.set_voxel(3, 3, 3, Voxel::AIR);
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_set_same_voxel_no_dirty() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.take_dirty_flags();

        chunk.set_voxel(0, 0, 0, Voxel::AIR);
        assert!(chunk.take_dirty_flags().is_empty());
    }

    #[test]
    fn take_dirty_leaves_other_flags() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        assert_eq!(chunk.take_dirty(DirtyFlags::MAP), DirtyFlags::MAP);
        assert_eq!(chunk.take_dirty_flags(), DirtyFlags::HEIGHTMAP);
    }

    #[test]
    fn test_chunk_pos_ordering() {
        let pos1 = ChunkPos::new(0, 0);
        let pos2 = ChunkPos::new(1, 0);
        let pos3 = ChunkPos::new(0, 1);

        assert!(pos1 < pos2);
        assert!(pos1 < pos3);
    }

    #[test]
    fn test_chunk_pos_serialization() {
        let pos = ChunkPos::new(-5, 10);

        let serialized = serde_json::to_string(&pos).unwrap();
        let deserialized: ChunkPos = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, pos);
    }
}
