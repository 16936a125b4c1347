//! Seeded terrain for map previews and tests.
//!
//! Produces overworld columns (grass, beaches, seas with submerged plants,
//! snow-capped peaks) and roofed nether chunks with open caverns.

use mappy_core::DimensionId;
use noise::{NoiseFn, Perlin};
use tracing::{debug, instrument};

use crate::blocks::*;
use crate::chunk::{BlockId, Chunk, ChunkPos, Voxel, CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Sea level height.
pub const SEA_LEVEL: i32 = 62;
/// Surface height above which peaks collect snow.
pub const SNOW_LINE: i32 = 96;
/// Bedrock roof height of roofed dimensions.
pub const NETHER_ROOF: i32 = 127;
/// Lava sea level of roofed dimensions.
pub const NETHER_LAVA_LEVEL: i32 = 31;

const BASE_HEIGHT: f64 = 68.0;
const HEIGHT_VARIATION: f64 = 44.0;

/// Multi-octave Perlin sampler.
struct Octaves {
    perlin: Perlin,
    frequency: f64,
    octaves: u32,
}

impl Octaves {
    fn new(seed: u32, frequency: f64, octaves: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            frequency,
            octaves,
        }
    }

    /// Returns value in range [-1.0, 1.0].
    fn sample_2d(&self, x: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_value = 0.0;
        for _ in 0..self.octaves {
            value += self.perlin.get([x * frequency, z * frequency]) * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        value / max_value
    }

    fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_value = 0.0;
        for _ in 0..self.octaves {
            value += self
                .perlin
                .get([x * frequency, y * frequency, z * frequency])
                * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        value / max_value
    }
}

/// Terrain generator that fills chunks with blocks.
pub struct TerrainGenerator {
    world_seed: u64,
    dimension: DimensionId,
    height: Octaves,
    detail: Octaves,
}

impl TerrainGenerator {
    /// Create a generator for one dimension of a world.
    pub fn new(world_seed: u64, dimension: DimensionId) -> Self {
        let seed = (world_seed ^ (world_seed >> 32)) as u32;
        Self {
            world_seed,
            dimension,
            height: Octaves::new(seed, 0.006, 4),
            detail: Octaves::new(seed.wrapping_add(1000), 0.09, 2),
        }
    }

    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    /// Generate a fully populated chunk at the given position. The chunk keeps
    /// its dirty flags so whoever stores it paints it at least once.
    #[instrument(skip(self), fields(chunk_pos = %chunk_pos, world_seed = self.world_seed))]
    pub fn generate_chunk(&self, chunk_pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(chunk_pos);
        for z in 0..CHUNK_SIZE_Z {
            for x in 0..CHUNK_SIZE_X {
                let world_x = chunk_pos.world_x(x as i32) as f64;
                let world_z = chunk_pos.world_z(z as i32) as f64;
                if self.dimension.has_ceiling() {
                    self.fill_roofed_column(&mut chunk, x, z, world_x, world_z);
                } else {
                    self.fill_open_column(&mut chunk, x, z, world_x, world_z);
                }
            }
        }
        debug!(
            min = chunk.heightmap().min_height(),
            max = chunk.heightmap().max_height(),
            "generated chunk"
        );
        chunk
    }

    /// Surface height of an open-sky column.
    pub fn surface_height(&self, world_x: f64, world_z: f64) -> i32 {
        let noise = self.height.sample_2d(world_x, world_z);
        (BASE_HEIGHT + noise * HEIGHT_VARIATION).round().clamp(4.0, 200.0) as i32
    }

    fn fill_open_column(&self, chunk: &mut Chunk, x: usize, z: usize, wx: f64, wz: f64) {
        let surface = self.surface_height(wx, wz);
        let detail = self.detail.sample_2d(wx, wz);

        place(chunk, x, z, 0, BLOCK_BEDROCK);
        for y in 1..surface - 3 {
            place(chunk, x, z, y, BLOCK_STONE);
        }
        let (filler, top) = if surface < SEA_LEVEL - 1 {
            (BLOCK_GRAVEL, if detail > 0.2 { BLOCK_CLAY } else { BLOCK_SAND })
        } else if surface <= SEA_LEVEL + 1 {
            (BLOCK_SAND, BLOCK_SAND)
        } else if surface >= SNOW_LINE {
            (BLOCK_STONE, BLOCK_STONE)
        } else {
            (BLOCK_DIRT, BLOCK_GRASS)
        };
        for y in (surface - 3).max(1)..surface {
            place(chunk, x, z, y, filler);
        }
        place(chunk, x, z, surface, top);

        if surface < SEA_LEVEL {
            for y in surface + 1..=SEA_LEVEL {
                place(chunk, x, z, y, BLOCK_WATER);
            }
            let depth = SEA_LEVEL - surface;
            if detail > 0.45 && depth >= 3 {
                for y in surface + 1..SEA_LEVEL {
                    place(chunk, x, z, y, BLOCK_KELP);
                }
            } else if detail > 0.15 && depth >= 2 {
                place(chunk, x, z, surface + 1, BLOCK_SEAGRASS);
            }
        } else if surface >= SNOW_LINE {
            place(chunk, x, z, surface + 1, BLOCK_SNOW);
        } else if top == BLOCK_GRASS && detail > 0.5 {
            place(chunk, x, z, surface + 1, BLOCK_TALL_GRASS);
        }
    }

    fn fill_roofed_column(&self, chunk: &mut Chunk, x: usize, z: usize, wx: f64, wz: f64) {
        place(chunk, x, z, 0, BLOCK_BEDROCK);
        place(chunk, x, z, NETHER_ROOF, BLOCK_BEDROCK);
        for y in 1..NETHER_ROOF {
            let cavern = self.height.sample_3d(wx * 4.0, y as f64 * 6.0, wz * 4.0);
            // Caverns widen towards the middle of the dimension.
            let band = 1.0 - ((y - 64) as f64 / 64.0).abs();
            if cavern * band > 0.12 {
                if y <= NETHER_LAVA_LEVEL {
                    place(chunk, x, z, y, BLOCK_LAVA);
                }
            } else {
                let detail = self.detail.sample_3d(wx, y as f64, wz);
                let id = if detail > 0.55 {
                    BLOCK_SOUL_SAND
                } else if detail < -0.6 {
                    BLOCK_GLOWSTONE
                } else {
                    BLOCK_NETHERRACK
                };
                place(chunk, x, z, y, id);
            }
        }
    }
}

fn place(chunk: &mut Chunk, x: usize, z: usize, y: i32, id: BlockId) {
    chunk.set_voxel(x, y as usize, z, Voxel::of(id));
}
