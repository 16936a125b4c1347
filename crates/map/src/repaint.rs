//! Per-chunk repaint pass.

use mappy_core::{DimensionId, PackedColor};
use mappy_world::{Chunk, ChunkPos, DirtyFlags, WorldView, CHUNK_COLUMNS, CHUNK_SIZE_X, CHUNK_SIZE_Z};
use tracing::{debug, instrument, trace};

use crate::cache::ChunkPixelCache;
use crate::cave::scan_column;
use crate::settings::MapSettings;
use crate::shade::shade_column;
use crate::surface::{sample_top_color, ColumnSample};

/// Which sampling path a repaint pass takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLayer {
    /// Surface colors seen from above, with optional relief shading.
    TopView,
    /// Nearest ceiling or floor as seen from `start_y`.
    Cave {
        /// y the per-column scans start from (usually the viewer's).
        start_y: i32,
    },
}

impl MapLayer {
    /// Layer suited to a dimension for a viewer standing at `viewer_y`.
    pub fn for_dimension(dimension: DimensionId, viewer_y: i32) -> Self {
        if dimension.has_ceiling() {
            MapLayer::Cave { start_y: viewer_y }
        } else {
            MapLayer::TopView
        }
    }
}

/// Pixels produced by one repaint of one chunk, z-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkImage {
    /// Chunk the pixels belong to.
    pub position: ChunkPos,
    /// Opaque (or cached) surface colors.
    pub colors: Vec<PackedColor>,
    /// Relief overlay, alpha-encoded intensity. Top view with shading only.
    pub shading: Option<Vec<PackedColor>>,
    /// Columns that reused their cached pixel.
    pub cached_columns: usize,
}

impl ChunkImage {
    /// Color of one column.
    pub fn color(&self, local_x: usize, local_z: usize) -> PackedColor {
        self.colors[local_z * CHUNK_SIZE_X + local_x]
    }

    /// Shading overlay of one column, when computed.
    pub fn shade(&self, local_x: usize, local_z: usize) -> Option<PackedColor> {
        self.shading
            .as_ref()
            .map(|shading| shading[local_z * CHUNK_SIZE_X + local_x])
    }

    /// Colors with the relief overlay blended on top.
    pub fn composite(&self) -> Vec<PackedColor> {
        match &self.shading {
            Some(shading) => self
                .colors
                .iter()
                .zip(shading)
                .map(|(&color, &shade)| shade.over(color))
                .collect(),
            None => self.colors.clone(),
        }
    }
}

/// Map state owned by one chunk: its pixel cache.
#[derive(Debug, Clone)]
pub struct MapChunk {
    position: ChunkPos,
    cache: ChunkPixelCache,
}

impl MapChunk {
    /// Fresh state for the chunk at `position`.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            cache: ChunkPixelCache::new(),
        }
    }

    /// Chunk this state belongs to.
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// The chunk's pixel cache.
    pub fn cache(&self) -> &ChunkPixelCache {
        &self.cache
    }

    /// Consume the chunk's map dirty flag. True when its blocks changed since
    /// the last call.
    pub fn needs_repaint(&self, chunk: &mut Chunk) -> bool {
        debug_assert_eq!(chunk.position(), self.position);
        !chunk.take_dirty(DirtyFlags::MAP).is_empty()
    }

    /// Sample all 256 columns. Returns `None` when the chunk is not resident.
    #[instrument(skip(self, world, settings), fields(chunk = %self.position))]
    pub fn repaint<W>(&mut self, world: &W, settings: &MapSettings, layer: MapLayer) -> Option<ChunkImage>
    where
        W: WorldView + ?Sized,
    {
        let Some(chunk) = world.chunk(self.position) else {
            debug!("chunk not resident, skipping repaint");
            return None;
        };

        let mut colors = Vec::with_capacity(CHUNK_COLUMNS);
        let mut shading = match layer {
            MapLayer::TopView if settings.shading => Some(Vec::with_capacity(CHUNK_COLUMNS)),
            _ => None,
        };
        let mut cached_columns = 0;

        for z in 0..CHUNK_SIZE_Z {
            for x in 0..CHUNK_SIZE_X {
                let sample = match layer {
                    MapLayer::TopView => sample_top_color(world, chunk, x, z),
                    MapLayer::Cave { start_y } => {
                        scan_column(world, chunk, x, start_y, z, settings.sky_threshold)
                    }
                };
                if sample == ColumnSample::UseCache {
                    trace!(x, z, "reusing cached pixel");
                    cached_columns += 1;
                }
                colors.push(self.cache.resolve(x, z, sample));

                if let Some(shading) = shading.as_mut() {
                    shading.push(shade_column(
                        world,
                        chunk,
                        x as i32,
                        z as i32,
                        settings.max_difference,
                    ));
                }
            }
        }

        debug!(?layer, cached_columns, "repainted chunk");
        Some(ChunkImage {
            position: self.position,
            colors,
            shading,
            cached_columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mappy_testkit::ColumnWorld;
    use mappy_world::{Voxel, BLOCK_GRASS, BLOCK_NETHERRACK, BLOCK_STONE};

    const HOME: ChunkPos = ChunkPos::new(0, 0);

    fn grass_world() -> ColumnWorld {
        let mut world = ColumnWorld::new();
        world.flat_chunk(HOME, 20, BLOCK_STONE);
        for z in 0..16 {
            for x in 0..16 {
                world.column(x, z).gap(21).block(BLOCK_GRASS);
            }
        }
        world
    }

    #[test]
    fn layer_follows_dimension() {
        assert_eq!(
            MapLayer::for_dimension(DimensionId::Overworld, 70),
            MapLayer::TopView
        );
        assert_eq!(
            MapLayer::for_dimension(DimensionId::Nether, 70),
            MapLayer::Cave { start_y: 70 }
        );
    }

    #[test]
    fn top_view_fills_every_column() {
        let world = grass_world();
        let mut map = MapChunk::new(HOME);
        let image = map
            .repaint(&world, &MapSettings::default(), MapLayer::TopView)
            .expect("chunk resident");
        assert_eq!(image.colors.len(), CHUNK_COLUMNS);
        assert_eq!(image.cached_columns, 0);
        let grass = PackedColor::opaque(0x7FB238);
        assert!(image.colors.iter().all(|&c| c == grass));
        assert_eq!(map.cache().pixels(), image.colors.as_slice());

        let shading = image.shading.as_ref().expect("shading enabled");
        assert_eq!(shading.len(), CHUNK_COLUMNS);
        // Flat interior columns are unshaded.
        assert_eq!(image.shade(5, 5).map(PackedColor::alpha), Some(0));
    }

    #[test]
    fn shading_can_be_disabled() {
        let world = grass_world();
        let settings = MapSettings {
            shading: false,
            ..MapSettings::default()
        };
        let image = MapChunk::new(HOME)
            .repaint(&world, &settings, MapLayer::TopView)
            .unwrap();
        assert!(image.shading.is_none());
        assert_eq!(image.composite(), image.colors);
    }

    #[test]
    fn air_at_heightmap_top_reuses_previous_pixel() {
        let world = grass_world();
        let mut map = MapChunk::new(HOME);
        let settings = MapSettings::default();
        let first = map.repaint(&world, &settings, MapLayer::TopView).unwrap();

        // Blank the chunk's data while keeping a stale heightmap view.
        struct HollowWorld<'a>(&'a ColumnWorld);
        impl WorldView for HollowWorld<'_> {
            fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
                self.0.chunk(pos)
            }
            fn is_chunk_loaded(&self, pos: ChunkPos) -> bool {
                self.0.is_chunk_loaded(pos)
            }
            fn block_at(&self, _pos: mappy_world::WorldPos) -> Voxel {
                Voxel::AIR
            }
        }
        let second = map
            .repaint(&HollowWorld(&world), &settings, MapLayer::TopView)
            .unwrap();
        assert_eq!(second.cached_columns, CHUNK_COLUMNS);
        assert_eq!(second.colors, first.colors);
    }

    #[test]
    fn cave_layer_skips_shading() {
        let mut world = ColumnWorld::new();
        world.flat_chunk(HOME, 100, BLOCK_NETHERRACK);
        let image = MapChunk::new(HOME)
            .repaint(
                &world,
                &MapSettings::default(),
                MapLayer::Cave { start_y: 64 },
            )
            .unwrap();
        assert!(image.shading.is_none());
        let netherrack = PackedColor::opaque(0x700200);
        assert!(image.colors.iter().all(|&c| c == netherrack));
    }

    #[test]
    fn missing_chunk_is_not_repainted() {
        let world = ColumnWorld::new();
        let mut map = MapChunk::new(ChunkPos::new(4, 4));
        assert!(map
            .repaint(&world, &MapSettings::default(), MapLayer::TopView)
            .is_none());
    }

    #[test]
    fn block_edits_request_repaint() {
        let mut world = grass_world();
        let map = MapChunk::new(HOME);
        assert!(map.needs_repaint(world.chunk_mut(HOME)));
        assert!(!map.needs_repaint(world.chunk_mut(HOME)));
        world.set(mappy_world::WorldPos::new(1, 30, 1), BLOCK_STONE);
        assert!(map.needs_repaint(world.chunk_mut(HOME)));
    }
}
