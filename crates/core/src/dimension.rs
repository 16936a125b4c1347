//! Dimension identifiers.
//!
//! The map picks its sampling path per dimension: open-sky dimensions are drawn
//! top-down, roofed dimensions need a cave scan from the viewer's height.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable identifier for a world dimension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DimensionId {
    /// The Overworld dimension.
    #[default]
    Overworld = 0,
    /// The Nether dimension.
    Nether = 1,
    /// The End dimension.
    End = 2,
}

impl DimensionId {
    /// Default (Overworld) dimension.
    pub const DEFAULT: Self = Self::Overworld;

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::Nether => "nether",
            Self::End => "end",
        }
    }

    /// Whether the dimension has a solid roof, so a top-down view would only
    /// ever show the ceiling.
    pub const fn has_ceiling(self) -> bool {
        matches!(self, Self::Nether)
    }
}

impl FromStr for DimensionId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "overworld" => Ok(Self::Overworld),
            "nether" => Ok(Self::Nether),
            "end" => Ok(Self::End),
            other => Err(format!("unknown dimension '{other}'")),
        }
    }
}
