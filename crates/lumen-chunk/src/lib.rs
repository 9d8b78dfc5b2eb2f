//! Voxel positions and per-chunk block/light storage.
#![forbid(unsafe_code)]

mod chunk;
mod coords;
mod generator;

pub use chunk::Chunk;
pub use coords::{
    BlockPosition, ChunkDims, ChunkPosition, DimsError, Direction, MAX_FOOTPRINT, RelativeBlockPosition,
};
pub use generator::ChunkGenerator;
