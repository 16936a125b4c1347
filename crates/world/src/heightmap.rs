//! Motion-blocking heightmap.
//!
//! Caches, per column, one above the highest block that blocks motion or holds
//! fluid. Map renderers read the surface from here instead of scanning voxels.

use crate::chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Heightmap for a single chunk (16x16).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    /// Indexed as heights[z][x] for cache-friendly iteration.
    heights: [[i32; CHUNK_SIZE_X]; CHUNK_SIZE_Z],
}

impl Default for Heightmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heightmap {
    /// A heightmap for an all-air chunk.
    pub fn new() -> Self {
        Self {
            heights: [[0; CHUNK_SIZE_X]; CHUNK_SIZE_Z],
        }
    }

    /// Get the height at a specific local (x, z) coordinate within the chunk.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    pub fn get(&self, local_x: usize, local_z: usize) -> i32 {
        assert!(local_x < CHUNK_SIZE_X, "local_x out of bounds");
        assert!(local_z < CHUNK_SIZE_Z, "local_z out of bounds");
        self.heights[local_z][local_x]
    }

    pub(crate) fn set(&mut self, local_x: usize, local_z: usize, height: i32) {
        self.heights[local_z][local_x] = height;
    }

    /// Get a reference to the raw height array, indexed as [z][x].
    pub fn heights(&self) -> &[[i32; CHUNK_SIZE_X]; CHUNK_SIZE_Z] {
        &self.heights
    }

    /// Get the minimum height in this heightmap.
    pub fn min_height(&self) -> i32 {
        self.heights
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .min()
            .unwrap_or(0)
    }

    /// Get the maximum height in this heightmap.
    pub fn max_height(&self) -> i32 {
        self.heights
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_heightmap_is_flat_zero() {
        let hm = Heightmap::new();
        assert_eq!(hm.min_height(), 0);
        assert_eq!(hm.max_height(), 0);
    }

    #[test]
    fn set_is_indexed_z_major() {
        let mut hm = Heightmap::new();
        hm.set(3, 7, 42);
        assert_eq!(hm.get(3, 7), 42);
        assert_eq!(hm.heights()[7][3], 42);
        assert_eq!(hm.get(7, 3), 0);
        assert_eq!(hm.max_height(), 42);
    }

    #[test]
    #[should_panic(expected = "local_x out of bounds")]
    fn get_rejects_out_of_range_column() {
        Heightmap::new().get(CHUNK_SIZE_X, 0);
    }
}
