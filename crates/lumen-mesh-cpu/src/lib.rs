//! CPU tessellation: visible block faces to per-face vertex/index lists.
#![forbid(unsafe_code)]

mod build;
mod emit;
mod face;
mod mesh;

pub use build::{mesh_slice, tessellate_chunk, tessellate_chunks};
pub use emit::{emit_block_faces, vertex_light};
pub use face::Face;
pub use mesh::{ChunkMesh, FaceMesh, Vertex};
