use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};

use lumen_blocks::{BlockPalette, PrototypeRegistry};
use lumen_chunk::{ChunkDims, ChunkPosition};
use lumen_lighting::light_chunks;
use lumen_mesh_cpu::{tessellate_chunk, tessellate_chunks};
use lumen_world::{NoiseGenerator, World};

fn noise_world(view_distance: i32) -> World {
    let mut world = World::new(ChunkDims::default(), view_distance, Arc::new(PrototypeRegistry::standard()));
    world.generate(&NoiseGenerator {
        seed: 1337,
        base_height: 64,
        amplitude: 12.0,
        frequency: 0.01,
        beach_level: 58,
    });
    world
}

fn bench_lighting(c: &mut Criterion) {
    let mut group = c.benchmark_group("lighting");
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("noise_5x5_16x128x16", |b| {
        b.iter_batched(
            || noise_world(2),
            |mut world| {
                let all = world.chunk_positions();
                black_box(light_chunks(&mut world, &all));
            },
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_tessellate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate");
    let mut world = noise_world(2);
    let all = world.chunk_positions();
    light_chunks(&mut world, &all);
    let palette = BlockPalette::default();
    group.bench_function("single_chunk_16x128x16", |b| {
        b.iter(|| black_box(tessellate_chunk(&world, ChunkPosition::new(0, 0), &palette)))
    });
    group.bench_function("parallel_5x5", |b| {
        b.iter(|| black_box(tessellate_chunks(&world, &all, &palette)))
    });
    group.finish();
}

criterion_group!(benches, bench_lighting, bench_tessellate);
criterion_main!(benches);
