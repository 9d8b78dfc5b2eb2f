use lumen_blocks::{BlockPalette, MAXIMUM_LIGHT_LEVEL};
use lumen_chunk::BlockPosition;
use lumen_geom::{Axis, Vec3};
use lumen_world::World;

use crate::face::Face;
use crate::mesh::ChunkMesh;

/// Emits one quad per face of the block at `pos` whose neighbor can be seen
/// through. Blocks that cannot be seen emit nothing. Returns the number of
/// quads added.
pub fn emit_block_faces(world: &World, pos: BlockPosition, palette: &BlockPalette, mesh: &mut ChunkMesh) -> usize {
    let proto = world.block_at(pos);
    if !proto.can_be_seen() {
        return 0;
    }
    let color = palette.color(proto);
    let origin = pos.to_vec3();
    let mut quads = 0;
    for face in Face::ALL {
        if !world.block_at(pos.neighbor(face.direction())).can_be_seen_through() {
            continue;
        }
        let corners = face.corners();
        let positions = corners.map(|c| origin + Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32));
        let lighting = corners.map(|c| vertex_light(world, pos, face, c));
        mesh.face_mut(face).add_quad(positions, lighting, color);
        quads += 1;
    }
    quads
}

/// Smoothed light at one corner of a face: the voxel across the face, the
/// two voxels beside it sharing the corner's edges, and the one sharing only
/// the corner. Two opaque edge voxels hide the diagonal one.
pub fn vertex_light(world: &World, pos: BlockPosition, face: Face, corner: [u8; 3]) -> f32 {
    let adjacent = pos.neighbor(face.direction());
    let [u, v] = face.tangents();
    let toward = |p: BlockPosition, axis: Axis| {
        let step = if corner[axis.index()] == 1 { 1 } else { -1 };
        match axis {
            Axis::X => p.offset(step, 0, 0),
            Axis::Y => p.offset(0, step, 0),
            Axis::Z => p.offset(0, 0, step),
        }
    };
    let edge_u = toward(adjacent, u);
    let edge_v = toward(adjacent, v);
    let diagonal = toward(edge_u, v);

    let light = |p: BlockPosition| world.light_level(p) as u32;
    let mut sum = light(adjacent) + light(edge_u) + light(edge_v);
    let mut samples = 3;
    if world.block_at(edge_u).can_propagate_light() || world.block_at(edge_v).can_propagate_light() {
        sum += light(diagonal);
        samples += 1;
    }
    let average = sum as f32 / samples as f32;
    (average / MAXIMUM_LIGHT_LEVEL as f32).min(face.light_ceiling())
}
