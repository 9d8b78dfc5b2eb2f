//! Built-in chunk generators.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use lumen_blocks::BlockPrototype;
use lumen_chunk::{Chunk, ChunkGenerator};

/// Leaves every voxel as air.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        for rel in chunk.positions() {
            chunk.set_block_prototype(rel, BlockPrototype::Air);
        }
    }
}

/// Solid ground up to and including `ground_level`, air above.
#[derive(Clone, Copy, Debug)]
pub struct FlatGenerator {
    pub ground_level: i32,
}

impl FlatGenerator {
    pub fn new(ground_level: i32) -> Self {
        Self { ground_level }
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        for rel in chunk.positions() {
            let proto = column_block(rel.y as i32, self.ground_level);
            chunk.set_block_prototype(rel, proto);
        }
    }
}

/// Heightmap terrain from 2D OpenSimplex noise.
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    pub seed: i32,
    pub base_height: i32,
    pub amplitude: f32,
    pub frequency: f32,
    /// Columns whose surface sits at or below this height get sand on top.
    pub beach_level: i32,
}

impl NoiseGenerator {
    fn make_noise(&self) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(self.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(self.frequency));
        noise
    }

    fn surface_height(&self, noise: &mut FastNoiseLite, wx: i32, wz: i32, height: i32) -> i32 {
        let n = noise.get_noise_2d(wx as f32, wz as f32);
        let h = self.base_height + (n * self.amplitude).round() as i32;
        h.clamp(0, height - 1)
    }
}

impl ChunkGenerator for NoiseGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        // Noise state is built per chunk so the generator itself stays Sync.
        let mut noise = self.make_noise();
        let dims = chunk.dims();
        let origin = chunk.position().origin(dims);
        let height = dims.sy as i32;
        let mut heights = vec![0i32; dims.sx() * dims.sz()];
        for z in 0..dims.sz() {
            for x in 0..dims.sx() {
                heights[z * dims.sx() + x] =
                    self.surface_height(&mut noise, origin.x + x as i32, origin.z + z as i32, height);
            }
        }
        for rel in chunk.positions() {
            let surface = heights[rel.z * dims.sx() + rel.x];
            let y = rel.y as i32;
            let proto = if y == surface && surface <= self.beach_level {
                BlockPrototype::Sand
            } else {
                column_block(y, surface)
            };
            chunk.set_block_prototype(rel, proto);
        }
    }
}

/// Grass cap, three layers of dirt, stone beneath.
#[inline]
fn column_block(y: i32, surface: i32) -> BlockPrototype {
    if y > surface {
        BlockPrototype::Air
    } else if y == surface {
        BlockPrototype::Grass
    } else if y >= surface - 3 {
        BlockPrototype::Dirt
    } else {
        BlockPrototype::Stone
    }
}
