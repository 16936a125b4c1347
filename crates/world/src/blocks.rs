//! Block table: ids, coarse materials and map colors.

use mappy_core::PackedColor;

use crate::chunk::BlockId;

/// Reserved ID for air.
pub const BLOCK_AIR: BlockId = 0;
/// ID for stone.
pub const BLOCK_STONE: BlockId = 1;
/// ID for dirt.
pub const BLOCK_DIRT: BlockId = 2;
/// ID for grass block.
pub const BLOCK_GRASS: BlockId = 3;
/// ID for sand.
pub const BLOCK_SAND: BlockId = 4;
/// ID for gravel.
pub const BLOCK_GRAVEL: BlockId = 5;
/// ID for water.
pub const BLOCK_WATER: BlockId = 6;
/// ID for lava.
pub const BLOCK_LAVA: BlockId = 7;
/// ID for ice.
pub const BLOCK_ICE: BlockId = 8;
/// Snow layer lying on top of another block.
pub const BLOCK_SNOW: BlockId = 9;
/// ID for a full snow block.
pub const BLOCK_SNOW_BLOCK: BlockId = 10;
/// ID for bedrock.
pub const BLOCK_BEDROCK: BlockId = 11;
/// ID for oak log.
pub const BLOCK_OAK_LOG: BlockId = 12;
/// ID for oak leaves.
pub const BLOCK_OAK_LEAVES: BlockId = 13;
/// ID for tall grass.
pub const BLOCK_TALL_GRASS: BlockId = 14;
/// ID for seagrass.
pub const BLOCK_SEAGRASS: BlockId = 15;
/// ID for kelp.
pub const BLOCK_KELP: BlockId = 16;
/// ID for clay.
pub const BLOCK_CLAY: BlockId = 17;
/// ID for netherrack.
pub const BLOCK_NETHERRACK: BlockId = 18;
/// ID for soul sand.
pub const BLOCK_SOUL_SAND: BlockId = 19;
/// ID for glowstone.
pub const BLOCK_GLOWSTONE: BlockId = 20;

/// Coarse block classification used for surface decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Nothing there.
    Air,
    /// Water and lava.
    Liquid,
    /// Plants that only grow submerged (seagrass, kelp). Always waterlogged.
    UnderwaterPlant,
    /// Dry, walk-through vegetation.
    Plant,
    /// Thin snow cover; does not block motion.
    SnowLayer,
    /// Everything else.
    Solid,
}

impl Material {
    /// Material of a block id. Unknown ids count as solid.
    pub fn of(id: BlockId) -> Self {
        match id {
            BLOCK_AIR => Material::Air,
            BLOCK_WATER | BLOCK_LAVA => Material::Liquid,
            BLOCK_SEAGRASS | BLOCK_KELP => Material::UnderwaterPlant,
            BLOCK_TALL_GRASS => Material::Plant,
            BLOCK_SNOW => Material::SnowLayer,
            _ => Material::Solid,
        }
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        self == Material::Liquid
    }

    /// Whether the block counts for the motion-blocking heightmap: it either
    /// stops movement or contains fluid.
    pub fn blocks_motion(self) -> bool {
        matches!(
            self,
            Material::Solid | Material::Liquid | Material::UnderwaterPlant
        )
    }
}

/// Brightness variant a map color is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapShade {
    /// Darkened to 180/255.
    Low,
    /// Darkened to 220/255.
    Medium,
    /// Unmodified base color.
    #[default]
    Normal,
    /// Darkened to 135/255.
    Lowest,
}

impl MapShade {
    /// Channel multiplier out of 255.
    pub const fn multiplier(self) -> u32 {
        match self {
            MapShade::Low => 180,
            MapShade::Medium => 220,
            MapShade::Normal => 255,
            MapShade::Lowest => 135,
        }
    }
}

/// Base color a block contributes to a map, before shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapColor(u32);

impl MapColor {
    pub const NONE: Self = Self(0x000000);
    pub const GRASS: Self = Self(0x7FB238);
    pub const SAND: Self = Self(0xF7E9A3);
    pub const FIRE: Self = Self(0xFF0000);
    pub const ICE: Self = Self(0xA0A0FF);
    pub const FOLIAGE: Self = Self(0x007C00);
    pub const SNOW: Self = Self(0xFFFFFF);
    pub const CLAY: Self = Self(0xA4A8B8);
    pub const DIRT: Self = Self(0x976D4D);
    pub const STONE: Self = Self(0x707070);
    pub const WATER: Self = Self(0x4040FF);
    pub const WOOD: Self = Self(0x8F7748);
    pub const BROWN: Self = Self(0x664C33);
    pub const NETHER: Self = Self(0x700200);

    /// Map color of a block id.
    pub fn of(id: BlockId) -> Self {
        match id {
            BLOCK_AIR => MapColor::NONE,
            BLOCK_GRASS => MapColor::GRASS,
            BLOCK_SAND | BLOCK_GLOWSTONE => MapColor::SAND,
            BLOCK_LAVA => MapColor::FIRE,
            BLOCK_ICE => MapColor::ICE,
            BLOCK_OAK_LEAVES | BLOCK_TALL_GRASS => MapColor::FOLIAGE,
            BLOCK_SNOW | BLOCK_SNOW_BLOCK => MapColor::SNOW,
            BLOCK_CLAY => MapColor::CLAY,
            BLOCK_DIRT => MapColor::DIRT,
            BLOCK_WATER | BLOCK_SEAGRASS | BLOCK_KELP => MapColor::WATER,
            BLOCK_OAK_LOG => MapColor::WOOD,
            BLOCK_SOUL_SAND => MapColor::BROWN,
            BLOCK_NETHERRACK => MapColor::NETHER,
            _ => MapColor::STONE,
        }
    }

    /// Base color as `0xRRGGBB`.
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Opaque render color at the given brightness.
    pub fn render_color(self, shade: MapShade) -> PackedColor {
        let m = shade.multiplier();
        let scale = |channel: u32| ((channel & 0xFF) * m / 255) as u8;
        PackedColor::from_argb(0xFF, scale(self.0 >> 16), scale(self.0 >> 8), scale(self.0))
    }
}
