use std::sync::Arc;

use lumen_blocks::{BlockPrototype, MAXIMUM_LIGHT_LEVEL, PrototypeRegistry};

use crate::coords::{ChunkDims, ChunkPosition, RelativeBlockPosition};
use crate::generator::ChunkGenerator;

/// Dense block and light storage for one column of the world.
///
/// The arrays are allocated once in [`Chunk::new`] and only ever mutated in
/// place. Three cached bounds narrow the vertical range that lighting and
/// meshing need to look at:
///
/// * `highest_visible_block` is at least the largest Y holding a visible block
///   (`-1` when there is none);
/// * `lowest_invisible_block` is at most the smallest Y holding an invisible
///   block (`sy` when there is none);
/// * `lowest_sunlit_block` is at most the smallest Y reached by direct
///   sunlight (`sy` before the first sunlight cast).
#[derive(Clone, Debug)]
pub struct Chunk {
    position: ChunkPosition,
    dims: ChunkDims,
    registry: Arc<PrototypeRegistry>,
    blocks: Vec<u8>,
    light: Vec<u8>,
    highest_visible_block: i32,
    lowest_sunlit_block: i32,
    lowest_invisible_block: i32,
}

impl Chunk {
    /// An all-air, unlit chunk.
    pub fn new(position: ChunkPosition, dims: ChunkDims, registry: Arc<PrototypeRegistry>) -> Self {
        let volume = dims.volume();
        Self {
            position,
            dims,
            registry,
            blocks: vec![0; volume],
            light: vec![0; volume],
            highest_visible_block: -1,
            lowest_sunlit_block: dims.sy as i32,
            lowest_invisible_block: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPosition {
        self.position
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn registry(&self) -> &Arc<PrototypeRegistry> {
        &self.registry
    }

    /// Lateral neighbors: left, right, front, back.
    #[inline]
    pub fn neighbor_positions(&self) -> [ChunkPosition; 4] {
        self.position.neighbors()
    }

    #[inline]
    pub fn block(&self, rel: RelativeBlockPosition) -> BlockPrototype {
        self.registry.prototype(self.blocks[self.dims.index(rel)])
    }

    /// Writes a block and widens the cached bounds to cover it. Returns
    /// `false` (and writes nothing) for a prototype the registry does not
    /// know.
    pub fn set_block_prototype(&mut self, rel: RelativeBlockPosition, prototype: BlockPrototype) -> bool {
        let Some(index) = self.registry.index_of(prototype) else {
            return false;
        };
        let i = self.dims.index(rel);
        self.blocks[i] = index;
        if !prototype.can_propagate_light() {
            self.light[i] = 0;
        }
        let y = rel.y as i32;
        if prototype.can_be_seen() {
            if y > self.highest_visible_block {
                self.highest_visible_block = y;
            }
        } else if y < self.lowest_invisible_block {
            self.lowest_invisible_block = y;
        }
        true
    }

    #[inline]
    pub fn light_level(&self, rel: RelativeBlockPosition) -> u8 {
        self.light[self.dims.index(rel)]
    }

    #[inline]
    pub fn set_light_level(&mut self, rel: RelativeBlockPosition, level: u8) {
        debug_assert!(level <= MAXIMUM_LIGHT_LEVEL, "light level {level} out of range");
        let i = self.dims.index(rel);
        debug_assert!(
            level == 0 || self.registry.prototype(self.blocks[i]).can_propagate_light(),
            "lighting an opaque block at {rel:?}"
        );
        self.light[i] = level;
    }

    #[inline]
    pub fn highest_visible_block(&self) -> i32 {
        self.highest_visible_block
    }

    #[inline]
    pub fn lowest_invisible_block(&self) -> i32 {
        self.lowest_invisible_block
    }

    #[inline]
    pub fn lowest_sunlit_block(&self) -> i32 {
        self.lowest_sunlit_block
    }

    /// Recorded by the sunlight cast once it has visited every column.
    #[inline]
    pub fn set_lowest_sunlit_block(&mut self, y: i32) {
        self.lowest_sunlit_block = y;
    }

    /// Runs a generator over the chunk. The generator must write every
    /// voxel, so the bounds restart from "nothing written" and are rebuilt
    /// purely from its writes.
    pub fn generate(&mut self, generator: &dyn ChunkGenerator) {
        self.highest_visible_block = -1;
        self.lowest_invisible_block = self.dims.sy as i32;
        generator.generate(self);
        debug_assert!(
            self.bounds_cover_contents(),
            "generator left voxels of chunk {} unwritten",
            self.position
        );
    }

    /// Rebuilds the visibility bounds from the block array.
    pub fn recompute_bounds(&mut self) {
        let (highest, lowest) = self.scan_visibility_extrema();
        self.highest_visible_block = highest;
        self.lowest_invisible_block = lowest;
    }

    /// True when the cached bounds include every block they must cover.
    pub fn bounds_cover_contents(&self) -> bool {
        let (highest, lowest) = self.scan_visibility_extrema();
        self.highest_visible_block >= highest && self.lowest_invisible_block <= lowest
    }

    fn scan_visibility_extrema(&self) -> (i32, i32) {
        let layer = self.dims.sx() * self.dims.sz();
        let mut highest = -1;
        let mut lowest = self.dims.sy as i32;
        for (y, row) in self.blocks.chunks_exact(layer).enumerate() {
            let y = y as i32;
            for &ix in row {
                if self.registry.prototype(ix).can_be_seen() {
                    highest = highest.max(y);
                } else {
                    lowest = lowest.min(y);
                }
            }
        }
        (highest, lowest)
    }

    /// Every local position, Y-major.
    pub fn positions(&self) -> impl Iterator<Item = RelativeBlockPosition> + use<> {
        let dims = self.dims;
        (0..dims.sy).flat_map(move |y| {
            (0..dims.sz()).flat_map(move |z| (0..dims.sx()).map(move |x| RelativeBlockPosition::new(x, y, z)))
        })
    }

    #[inline]
    pub fn light_levels(&self) -> &[u8] {
        &self.light
    }
}
