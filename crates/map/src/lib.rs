#![warn(missing_docs)]
//! Column sampling for top-down map layers.
//!
//! Each chunk column is turned into a color in one of two ways: the top view
//! (surface color plus a relief-shading overlay built from neighbour heights)
//! or the cave view (nearest ceiling or floor from a starting height). A
//! per-chunk pixel cache stands in for columns whose heightmap is momentarily
//! stale.

mod cache;
mod cave;
mod height;
mod repaint;
mod settings;
mod shade;
mod surface;

pub use cache::ChunkPixelCache;
pub use cave::{scan_column, ScanDirection};
pub use height::{resolve_height, surface_height, SurfaceHeight};
pub use repaint::{ChunkImage, MapChunk, MapLayer};
pub use settings::{MapSettings, SettingsError};
pub use shade::{relief, shade_column, DARK_TINT, LIGHT_TINT};
pub use surface::{block_color, sample_top_color, ColumnSample, SURFACE_SHADE};
