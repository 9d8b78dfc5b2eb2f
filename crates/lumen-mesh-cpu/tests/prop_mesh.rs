use std::sync::Arc;

use lumen_blocks::{BlockPalette, BlockPrototype, PrototypeRegistry};
use lumen_chunk::{Chunk, ChunkDims, ChunkGenerator, ChunkPosition, Direction};
use lumen_lighting::light_chunks;
use lumen_mesh_cpu::{Face, mesh_slice, tessellate_chunk};
use lumen_world::World;
use proptest::prelude::*;

struct Scatter {
    cells: Vec<u8>,
}

impl ChunkGenerator for Scatter {
    fn generate(&self, chunk: &mut Chunk) {
        let dims = chunk.dims();
        for rel in chunk.positions() {
            let proto = match self.cells[dims.index(rel)] {
                0 | 1 => BlockPrototype::Air,
                2 => BlockPrototype::Stone,
                _ => BlockPrototype::Dirt,
            };
            chunk.set_block_prototype(rel, proto);
        }
    }
}

fn scattered_world(cells: Vec<u8>, view_distance: i32) -> World {
    let dims = ChunkDims::new(4, 8, 4).unwrap();
    let mut world = World::new(dims, view_distance, Arc::new(PrototypeRegistry::standard()));
    world.generate(&Scatter { cells });
    let all = world.chunk_positions();
    light_chunks(&mut world, &all);
    world
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // One quad per (visible block, see-through neighbor) pair inside the
    // slice; outside it only bottom faces against the world floor exist.
    #[test]
    fn quads_match_exposed_faces(cells in prop::collection::vec(0u8..4, 128), view in 0i32..2) {
        let world = scattered_world(cells, view);
        let cp = ChunkPosition::new(0, 0);
        let mesh = tessellate_chunk(&world, cp, &BlockPalette::default()).unwrap();
        let rows = mesh_slice(&world, cp);
        let chunk = world.chunk(cp).unwrap();
        let dims = chunk.dims();
        let mut exposed = 0;
        for rel in chunk.positions() {
            let p = rel.to_absolute(cp, dims);
            if !world.block_at(p).can_be_seen() {
                continue;
            }
            for d in Direction::ALL {
                if !world.block_at(p.neighbor(d)).can_be_seen_through() {
                    continue;
                }
                if rows.as_ref().is_some_and(|r| r.contains(&rel.y)) {
                    exposed += 1;
                } else {
                    prop_assert!(d == Direction::Down && rel.y == 0, "{} {:?} left out", p, d);
                }
            }
        }
        prop_assert_eq!(mesh.quad_count(), exposed);
        prop_assert_eq!(mesh.index_count(), exposed * 6);
    }

    #[test]
    fn lighting_stays_within_face_ceiling(cells in prop::collection::vec(0u8..4, 128)) {
        let world = scattered_world(cells, 1);
        let mesh = tessellate_chunk(&world, ChunkPosition::new(0, 0), &BlockPalette::default()).unwrap();
        for face in Face::ALL {
            let fm = mesh.face(face);
            for v in &fm.vertices {
                prop_assert!(v.lighting[0] >= 0.0 && v.lighting[0] <= face.light_ceiling());
                prop_assert_eq!(v.lighting[0], v.lighting[2]);
            }
            prop_assert!(fm.indices.iter().all(|&i| (i as usize) < fm.vertices.len()));
        }
    }
}
