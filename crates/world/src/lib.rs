//! Voxel world collaborator for map rendering: chunks, heightmaps, block
//! materials and a chunk arena that tracks load state.

mod blocks;
mod chunk;
mod heightmap;
mod storage;
mod terrain;
mod view;

pub use blocks::*;
pub use chunk::*;
pub use heightmap::*;
pub use storage::*;
pub use terrain::*;
pub use view::*;
