//! Map state for a square of chunks around the origin.

use std::collections::BTreeMap;

use mappy_map::{ChunkImage, MapChunk, MapLayer, MapSettings};
use mappy_world::{ChunkPos, ChunkStorage, TerrainGenerator};
use tracing::{debug, info};

/// Chunks along one side of a `radius` region.
pub fn region_side(radius: u32) -> usize {
    radius as usize * 2 + 1
}

/// Chunks within `radius` of the origin chunk, in deterministic order.
pub fn region_positions(radius: u32) -> impl Iterator<Item = ChunkPos> {
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    (-radius..=radius).flat_map(move |z| (-radius..=radius).map(move |x| ChunkPos::new(x, z)))
}

/// Generate and load every chunk of the region.
pub fn generate_region(generator: &TerrainGenerator, radius: u32) -> ChunkStorage {
    let side = region_side(radius);
    let mut storage = ChunkStorage::new(side * side);
    for pos in region_positions(radius) {
        storage.insert(generator.generate_chunk(pos));
    }
    info!(
        chunks = storage.len(),
        dimension = generator.dimension().as_str(),
        "generated region"
    );
    storage
}

/// Per-chunk map state, one [`MapChunk`] per resident chunk.
#[derive(Default)]
pub struct MapRegion {
    chunks: BTreeMap<ChunkPos, MapChunk>,
}

impl MapRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Repaint chunks whose map flag is set. Map state of chunks that left
    /// the storage is dropped along with their pixel caches.
    pub fn repaint_dirty(
        &mut self,
        world: &mut ChunkStorage,
        settings: &MapSettings,
        layer: MapLayer,
    ) -> Vec<ChunkImage> {
        let before = self.chunks.len();
        self.chunks.retain(|pos, _| world.get(*pos).is_some());
        let dropped = before - self.chunks.len();
        if dropped > 0 {
            debug!(dropped, "dropped map state of evicted chunks");
        }

        let positions: Vec<ChunkPos> = world.iter_positions().collect();
        let mut stale = Vec::new();
        for pos in positions {
            let Some(chunk) = world.get_mut(pos) else {
                continue;
            };
            let map = self.chunks.entry(pos).or_insert_with(|| MapChunk::new(pos));
            if map.needs_repaint(chunk) {
                stale.push(pos);
            }
        }

        let mut images = Vec::with_capacity(stale.len());
        for pos in stale {
            if let Some(image) = self
                .chunks
                .get_mut(&pos)
                .and_then(|map| map.repaint(&*world, settings, layer))
            {
                images.push(image);
            }
        }
        debug!(repainted = images.len(), "region repaint pass");
        images
    }
}
