use std::sync::Arc;

use lumen_blocks::{BlockPrototype, PrototypeRegistry};
use lumen_chunk::{BlockPosition, ChunkDims, ChunkPosition};
use lumen_lighting::{light_chunks, relight_around};
use lumen_world::{BlockVolume, FlatGenerator, World};

fn flat_world(sx: usize, sy: usize, view_distance: i32, ground: i32) -> World {
    let dims = ChunkDims::new(sx, sy, sx).unwrap();
    let mut world = World::new(dims, view_distance, Arc::new(PrototypeRegistry::standard()));
    world.generate(&FlatGenerator::new(ground));
    world
}

fn light_all(world: &mut World) {
    let all = world.chunk_positions();
    light_chunks(world, &all);
}

fn light(world: &World, x: i32, y: i32, z: i32) -> u8 {
    world.light_level(BlockPosition::new(x, y, z))
}

fn carve(world: &mut World, positions: impl IntoIterator<Item = (i32, i32, i32)>) {
    for (x, y, z) in positions {
        assert!(world.set_block_prototype(BlockPosition::new(x, y, z), BlockPrototype::Air));
    }
}

#[test]
fn flat_terrain_is_lit_above_and_dark_below() {
    let mut world = flat_world(16, 64, 1, 20);
    light_all(&mut world);
    let air = BlockVolume::new(BlockPosition::new(-16, 21, -16), BlockPosition::new(31, 63, 31));
    let ground = BlockVolume::new(BlockPosition::new(-16, 0, -16), BlockPosition::new(31, 20, 31));
    assert!(air.light_levels(&world).all(|(_, l)| l == 15));
    assert!(ground.light_levels(&world).all(|(_, l)| l == 0));
}

#[test]
fn overhang_casts_a_graded_shadow() {
    let mut world = flat_world(16, 64, 1, 20);
    let slab = BlockVolume::new(BlockPosition::new(5, 30, 5), BlockPosition::new(9, 30, 9));
    slab.set_all(&mut world, BlockPrototype::Stone);
    light_all(&mut world);

    let under = BlockVolume::new(BlockPosition::new(5, 21, 5), BlockPosition::new(9, 29, 9));
    let levels: Vec<u8> = under.light_levels(&world).map(|(_, l)| l).collect();
    assert_eq!(levels.len(), 225);
    assert!(levels.iter().all(|&l| l > 0 && l < 15));
    let count = |level: u8| levels.iter().filter(|&&l| l == level).count();
    assert_eq!(count(14), 144);
    assert_eq!(count(13), 72);
    assert_eq!(count(12), 9);
    assert!(slab.light_levels(&world).all(|(_, l)| l == 0));
}

#[test]
fn sealed_pocket_stays_dark() {
    let mut world = flat_world(16, 64, 1, 40);
    let pocket = BlockVolume::new(BlockPosition::new(-3, 10, -3), BlockPosition::new(3, 14, 3));
    pocket.set_all(&mut world, BlockPrototype::Air);
    light_all(&mut world);
    assert!(pocket.light_levels(&world).all(|(_, l)| l == 0));
}

#[test]
fn light_crosses_chunk_borders_into_cavities() {
    let mut world = flat_world(8, 32, 1, 10);
    // Shaft at the +X edge of chunk (0, 0), tunnel into chunk (1, 0).
    carve(&mut world, [(7, 10, 3), (7, 9, 3), (8, 9, 3), (9, 9, 3), (10, 9, 3)]);
    light_all(&mut world);
    assert_eq!(light(&world, 7, 9, 3), 15);
    assert_eq!(light(&world, 8, 9, 3), 14);
    assert_eq!(light(&world, 9, 9, 3), 13);
    assert_eq!(light(&world, 10, 9, 3), 12);
}

#[test]
fn light_fades_out_along_a_long_tunnel() {
    let mut world = flat_world(8, 32, 3, 10);
    carve(&mut world, [(7, 10, 3), (7, 9, 3)]);
    carve(&mut world, (8..=27).map(|x| (x, 9, 3)));
    light_all(&mut world);
    for x in 8..=21 {
        assert_eq!(light(&world, x, 9, 3), (15 - (x - 7)) as u8, "x = {x}");
    }
    for x in 22..=27 {
        assert_eq!(light(&world, x, 9, 3), 0, "x = {x}");
    }
}

#[test]
fn closing_a_shaft_darkens_the_tunnel_behind_it() {
    let mut world = flat_world(8, 32, 1, 10);
    carve(&mut world, [(7, 10, 3), (7, 9, 3), (8, 9, 3), (9, 9, 3)]);
    light_all(&mut world);
    assert_eq!(light(&world, 9, 9, 3), 13);

    let cap = BlockPosition::new(7, 10, 3);
    world.set_block_prototype(cap, BlockPrototype::Grass);
    let report = relight_around(&mut world, &[ChunkPosition::new(0, 0)]);
    assert!(report.reset.contains(&ChunkPosition::new(1, 0)));
    assert_eq!(report.changed, vec![ChunkPosition::new(0, 0), ChunkPosition::new(1, 0)]);
    for x in 7..=9 {
        assert_eq!(light(&world, x, 9, 3), 0, "x = {x}");
    }

    world.set_block_prototype(cap, BlockPrototype::Air);
    relight_around(&mut world, &[ChunkPosition::new(0, 0)]);
    assert_eq!(light(&world, 7, 9, 3), 15);
    assert_eq!(light(&world, 9, 9, 3), 13);
}

#[test]
fn relighting_matches_lighting_from_scratch() {
    let mut world = flat_world(8, 32, 2, 10);
    carve(&mut world, [(1, 10, 1), (1, 9, 1), (2, 9, 1), (3, 9, 1), (3, 8, 1), (3, 7, 1)]);
    light_all(&mut world);
    let before: Vec<Vec<u8>> = world
        .chunk_positions()
        .into_iter()
        .map(|cp| world.chunk(cp).unwrap().light_levels().to_vec())
        .collect();

    relight_around(&mut world, &[ChunkPosition::new(0, 0)]);
    let after: Vec<Vec<u8>> = world
        .chunk_positions()
        .into_iter()
        .map(|cp| world.chunk(cp).unwrap().light_levels().to_vec())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn newly_streamed_chunks_receive_light_from_loaded_ones() {
    let mut world = flat_world(8, 32, 1, 10);
    // Overhang on the +X border, lit before its neighbor exists.
    let generator = FlatGenerator::new(10);
    let slab = BlockVolume::new(BlockPosition::new(12, 14, 2), BlockPosition::new(15, 14, 6));
    slab.set_all(&mut world, BlockPrototype::Stone);
    light_all(&mut world);
    assert_eq!(light(&world, 15, 12, 4), 12);

    let delta = world.set_center(ChunkPosition::new(1, 0), &generator);
    light_chunks(&mut world, &delta.loaded);
    // Fresh chunk at x = 2 is open sky next to the shadow.
    assert_eq!(light(&world, 16, 12, 4), 15);
    assert_eq!(light(&world, 15, 12, 4), 14);
    assert_eq!(light(&world, 14, 12, 4), 13);
}
