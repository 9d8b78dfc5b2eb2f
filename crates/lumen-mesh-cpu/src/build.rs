use std::ops::RangeInclusive;

use lumen_blocks::BlockPalette;
use lumen_chunk::{ChunkPosition, RelativeBlockPosition};
use lumen_world::World;
use rayon::prelude::*;

use crate::emit::emit_block_faces;
use crate::mesh::ChunkMesh;

/// Rows of `cp` that can hold a visible face: from one below the lowest
/// see-through block of the chunk or any lateral neighbor, up to the
/// chunk's highest visible block. A missing neighbor is open to the Void
/// at every height. `None` for an unloaded or empty chunk.
pub fn mesh_slice(world: &World, cp: ChunkPosition) -> Option<RangeInclusive<usize>> {
    let chunk = world.chunk(cp)?;
    let top = chunk.highest_visible_block();
    if top < 0 {
        return None;
    }
    let lowest_open = cp
        .neighbors()
        .iter()
        .map(|n| world.chunk(*n).map_or(0, |c| c.lowest_invisible_block()))
        .fold(chunk.lowest_invisible_block(), i32::min);
    let bottom = (lowest_open - 1).max(0);
    Some(bottom as usize..=top as usize)
}

/// Builds the geometry of one loaded chunk. Lighting for the chunk and its
/// loaded neighbors must be complete.
pub fn tessellate_chunk(world: &World, cp: ChunkPosition, palette: &BlockPalette) -> Option<ChunkMesh> {
    let chunk = world.chunk(cp)?;
    let dims = chunk.dims();
    let mut mesh = ChunkMesh::new(cp);
    let Some(rows) = mesh_slice(world, cp) else {
        return Some(mesh);
    };
    for y in rows {
        for z in 0..dims.sz() {
            for x in 0..dims.sx() {
                let rel = RelativeBlockPosition::new(x, y, z);
                if !chunk.block(rel).can_be_seen() {
                    continue;
                }
                emit_block_faces(world, rel.to_absolute(cp, dims), palette, &mut mesh);
            }
        }
    }
    Some(mesh)
}

/// Tessellates many chunks in parallel over a shared, read-only world.
/// Unloaded positions are skipped.
pub fn tessellate_chunks(world: &World, chunks: &[ChunkPosition], palette: &BlockPalette) -> Vec<ChunkMesh> {
    let meshes: Vec<ChunkMesh> = chunks
        .par_iter()
        .filter_map(|&cp| tessellate_chunk(world, cp, palette))
        .collect();
    log::debug!(
        target: "mesh",
        "tessellated {} chunk(s), {} quad(s)",
        meshes.len(),
        meshes.iter().map(ChunkMesh::quad_count).sum::<usize>()
    );
    meshes
}
