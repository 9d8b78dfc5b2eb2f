use std::sync::Arc;

use lumen_blocks::{BlockPrototype, PrototypeRegistry};
use lumen_chunk::{BlockPosition, ChunkDims, ChunkPosition};
use lumen_world::{BlockVolume, FlatGenerator, GeneratorConfig, World, WorldConfig};
use proptest::prelude::*;

fn flat_world(view_distance: i32) -> World {
    let dims = ChunkDims::new(8, 32, 8).unwrap();
    let mut world = World::new(dims, view_distance, Arc::new(PrototypeRegistry::standard()));
    world.generate(&FlatGenerator::new(10));
    world
}

#[test]
fn generate_fills_view_square() {
    let world = flat_world(1);
    assert_eq!(world.chunk_count(), 9);
    assert!(world.contains_chunk(ChunkPosition::new(-1, 1)));
    assert!(!world.contains_chunk(ChunkPosition::new(2, 0)));
}

#[test]
fn reads_outside_loaded_chunks_are_void() {
    let world = flat_world(0);
    let far = BlockPosition::new(1000, 5, 1000);
    assert_eq!(world.block_at(far), BlockPrototype::Void);
    assert_eq!(world.light_level(far), 0);
    assert_eq!(world.block_at(BlockPosition::new(0, -1, 0)), BlockPrototype::Void);
    assert_eq!(world.block_at(BlockPosition::new(0, 32, 0)), BlockPrototype::Void);
    // Reads never allocate a chunk.
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn writes_outside_loaded_chunks_are_ignored() {
    let mut world = flat_world(0);
    assert!(!world.set_block_prototype(BlockPosition::new(-1, 20, 0), BlockPrototype::Stone));
    assert!(!world.set_light_level(BlockPosition::new(0, 40, 0), 3));
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn void_is_never_stored() {
    let mut world = flat_world(0);
    let ground = BlockPosition::new(3, 10, 3);
    let above = BlockPosition::new(3, 20, 3);
    assert!(!world.set_block_prototype(ground, BlockPrototype::Void));
    assert!(!world.set_block_prototype(above, BlockPrototype::Void));
    assert_eq!(world.block_at(ground), BlockPrototype::Grass);
    assert_eq!(world.block_at(above), BlockPrototype::Air);
    let v = BlockVolume::new(BlockPosition::new(0, 12, 0), BlockPosition::new(1, 12, 1));
    assert_eq!(v.set_all(&mut world, BlockPrototype::Void), 0);
}

#[test]
fn negative_coordinates_route_to_the_owning_chunk() {
    let mut world = flat_world(1);
    let p = BlockPosition::new(-1, 20, -8);
    assert!(world.set_block_prototype(p, BlockPrototype::Sand));
    assert_eq!(world.block_at(p), BlockPrototype::Sand);
    let chunk = world.chunk(ChunkPosition::new(-1, -1)).unwrap();
    assert_eq!(chunk.highest_visible_block(), 20);
}

#[test]
fn moving_center_streams_chunks() {
    let mut world = flat_world(1);
    let delta = world.set_center(ChunkPosition::new(1, 0), &FlatGenerator::new(10));
    assert_eq!(delta.loaded.len(), 3);
    assert_eq!(delta.unloaded.len(), 3);
    assert!(delta.unloaded.iter().all(|cp| cp.x == -1));
    assert!(delta.loaded.iter().all(|cp| cp.x == 2));
    assert_eq!(world.chunk_count(), 9);
}

#[test]
fn volume_set_and_read() {
    let mut world = flat_world(1);
    let v = BlockVolume::new(BlockPosition::new(-2, 15, -2), BlockPosition::new(1, 16, 1));
    assert_eq!(v.block_count(), 32);
    assert_eq!(v.set_all(&mut world, BlockPrototype::Stone), 32);
    assert!(v.blocks(&world).all(|(_, b)| b == BlockPrototype::Stone));
    assert!(v.contains(BlockPosition::new(0, 16, 0)));
    assert!(!v.contains(BlockPosition::new(0, 17, 0)));
}

#[test]
#[should_panic(expected = "inverted block volume")]
fn inverted_volume_fails_fast() {
    BlockVolume::new(BlockPosition::new(0, 5, 0), BlockPosition::new(0, 4, 0));
}

#[test]
fn config_parses_with_defaults() {
    let cfg = WorldConfig::from_toml_str(
        r#"
        view_distance = 3
        [generator]
        kind = "noise"
        seed = 42
    "#,
    )
    .unwrap();
    assert_eq!(cfg.view_distance, 3);
    assert_eq!(cfg.chunk.x, 16);
    assert!(matches!(cfg.generator, GeneratorConfig::Noise { seed: 42, .. }));

    let default = WorldConfig::from_toml_str("").unwrap();
    assert_eq!(default, WorldConfig::default());
}

#[test]
fn config_rejects_bad_dims() {
    assert!(WorldConfig::from_toml_str("[chunk]\nx = 10\n").is_err());
    assert!(WorldConfig::from_toml_str("[chunk]\nx = 4294967296\n").is_err());
}

proptest! {
    // The corners can be given in any order.
    #[test]
    fn spanning_volume_is_valid(ax in -50i32..50, ay in -50i32..50, az in -50i32..50,
                                bx in -50i32..50, by in -50i32..50, bz in -50i32..50) {
        let a = BlockPosition::new(ax, ay, az);
        let b = BlockPosition::new(bx, by, bz);
        let v = BlockVolume::spanning(a, b);
        prop_assert!(v.contains(a) && v.contains(b));
        prop_assert_eq!(v.positions().count(), v.block_count());
    }
}
