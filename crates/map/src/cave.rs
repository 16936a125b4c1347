//! Cave-view column scanning for roofed dimensions.
//!
//! Starting at the viewer's height, the scanner walks the column until it
//! crosses an air/solid boundary: upwards to the ceiling when it starts inside
//! rock, downwards to the floor when it starts in open space.

use mappy_world::{Chunk, Voxel, WorldPos, WorldView};

use crate::surface::{block_color, sample_top_color, ColumnSample};

/// Which way a column scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Started in rock; looking for the first air above.
    Up,
    /// Started in open space; looking for the first solid block below.
    Down,
}

impl ScanDirection {
    /// Direction for a scan starting at `origin`.
    pub fn from_origin(origin: Voxel) -> Self {
        if origin.is_air() {
            ScanDirection::Down
        } else {
            ScanDirection::Up
        }
    }

    fn step(self) -> i32 {
        match self {
            ScanDirection::Up => 1,
            ScanDirection::Down => -1,
        }
    }

    fn is_boundary(self, voxel: Voxel) -> bool {
        match self {
            ScanDirection::Up => voxel.is_air(),
            ScanDirection::Down => !voxel.is_air(),
        }
    }
}

/// Color the column at (`local_x`, `local_z`) as seen from `start_y`.
///
/// At or above `sky_threshold` the column is open sky and is sampled top-down
/// instead. A `start_y` outside `(0, world height)` yields
/// [`ColumnSample::NoSurface`] without probing.
pub fn scan_column<W>(
    world: &W,
    chunk: &Chunk,
    local_x: usize,
    start_y: i32,
    local_z: usize,
    sky_threshold: i32,
) -> ColumnSample
where
    W: WorldView + ?Sized,
{
    if start_y >= sky_threshold {
        return sample_top_color(world, chunk, local_x, local_z);
    }
    let height = world.height();
    if start_y <= 0 || start_y >= height {
        return ColumnSample::NoSurface;
    }

    let chunk_pos = chunk.position();
    let origin = WorldPos::new(
        chunk_pos.world_x(local_x as i32),
        start_y,
        chunk_pos.world_z(local_z as i32),
    );
    let direction = ScanDirection::from_origin(world.block_at(origin));

    let mut y = start_y;
    loop {
        y += direction.step();
        let pos = origin.with_y(y);
        if direction.is_boundary(world.block_at(pos)) {
            let behind = pos.with_y(y - direction.step());
            return ColumnSample::Color(block_color(world.block_at(behind)));
        }
        if y >= height || y <= 0 {
            return ColumnSample::NoSurface;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mappy_core::PackedColor;
    use mappy_testkit::ColumnWorld;
    use mappy_world::{
        ChunkPos, MapColor, MapShade, BLOCK_GLOWSTONE, BLOCK_NETHERRACK, BLOCK_SOUL_SAND,
        BLOCK_STONE,
    };

    const HOME: ChunkPos = ChunkPos::new(0, 0);
    const SKY: i32 = 128;

    #[test]
    fn direction_follows_origin_block() {
        assert_eq!(ScanDirection::from_origin(Voxel::AIR), ScanDirection::Down);
        assert_eq!(
            ScanDirection::from_origin(Voxel::of(BLOCK_STONE)),
            ScanDirection::Up
        );
    }

    #[test]
    fn upward_scan_samples_last_solid_block() {
        let mut world = ColumnWorld::new();
        world
            .column(3, 3)
            .layer(BLOCK_NETHERRACK, 69)
            .block(BLOCK_GLOWSTONE)
            .gap(10)
            .block(BLOCK_NETHERRACK);
        // Glowstone sits at y = 69, air from y = 70.
        let sample = scan_column(&world, world.chunk_at(HOME), 3, 64, 3, SKY);
        assert_eq!(
            sample,
            ColumnSample::Color(MapColor::SAND.render_color(MapShade::Normal))
        );
    }

    #[test]
    fn downward_scan_samples_open_space_above_floor() {
        let mut world = ColumnWorld::new();
        world
            .column(0, 0)
            .layer(BLOCK_NETHERRACK, 30)
            .block(BLOCK_SOUL_SAND);
        world.column(0, 0).gap(100).block(BLOCK_NETHERRACK);
        // Starting in the air at y = 64 the scan stops on soul sand at y = 30
        // and samples the air right above it.
        let sample = scan_column(&world, world.chunk_at(HOME), 0, 64, 0, SKY);
        assert_eq!(sample, ColumnSample::Color(block_color(Voxel::AIR)));
    }

    #[test]
    fn scan_leaving_the_build_range() {
        let mut world = ColumnWorld::new();
        world.column(1, 1).block(BLOCK_STONE);
        // Open air all the way down to y = 1, then stone at y = 0.
        let down = scan_column(&world, world.chunk_at(HOME), 2, 50, 2, SKY);
        assert_eq!(down, ColumnSample::NoSurface);

        // Above the build range reads as air, so the top block is a ceiling.
        let mut solid = ColumnWorld::new();
        solid.column(0, 0).layer(BLOCK_STONE, 256);
        let up = scan_column(&solid, solid.chunk_at(HOME), 0, 100, 0, 300);
        assert_eq!(
            up,
            ColumnSample::Color(block_color(Voxel::of(BLOCK_STONE)))
        );
    }

    #[test]
    fn floor_reached_at_y_zero_is_a_boundary() {
        let mut world = ColumnWorld::new();
        world.column(5, 5).block(BLOCK_STONE);
        // Stone at y = 0 is found on the step that lands on the floor.
        let sample = scan_column(&world, world.chunk_at(HOME), 5, 3, 5, SKY);
        assert_eq!(sample, ColumnSample::Color(block_color(Voxel::AIR)));
    }

    #[test]
    fn above_sky_threshold_delegates_to_top_view() {
        let mut world = ColumnWorld::new();
        world.column(6, 6).layer(BLOCK_STONE, 127).block(BLOCK_NETHERRACK);
        let sample = scan_column(&world, world.chunk_at(HOME), 6, 200, 6, SKY);
        assert_eq!(
            sample,
            ColumnSample::Color(PackedColor::opaque(MapColor::NETHER.rgb()))
        );
    }

    #[test]
    fn out_of_range_start_is_rejected() {
        let mut world = ColumnWorld::new();
        world.column(0, 0).layer(BLOCK_STONE, 10);
        let chunk = world.chunk_at(HOME);
        assert_eq!(scan_column(&world, chunk, 0, 0, 0, SKY), ColumnSample::NoSurface);
        assert_eq!(scan_column(&world, chunk, 0, -20, 0, SKY), ColumnSample::NoSurface);
        assert_eq!(scan_column(&world, chunk, 0, 256, 0, 512), ColumnSample::NoSurface);
    }
}
