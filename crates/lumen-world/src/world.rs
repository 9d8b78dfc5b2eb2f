use std::error::Error;
use std::sync::Arc;

use hashbrown::HashMap;
use lumen_blocks::{BlockPrototype, PrototypeRegistry};
use lumen_chunk::{BlockPosition, Chunk, ChunkDims, ChunkGenerator, ChunkPosition};
use rayon::prelude::*;

use crate::config::WorldConfig;

/// Chunks that entered and left view in one streaming step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamDelta {
    pub loaded: Vec<ChunkPosition>,
    pub unloaded: Vec<ChunkPosition>,
}

impl StreamDelta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Owner of all loaded chunks and the only accessor that crosses chunk
/// boundaries. Anything outside a loaded chunk reads as `Void` with light 0.
pub struct World {
    dims: ChunkDims,
    registry: Arc<PrototypeRegistry>,
    chunks: HashMap<ChunkPosition, Chunk>,
    view_distance: i32,
    center: ChunkPosition,
}

impl World {
    pub fn new(dims: ChunkDims, view_distance: i32, registry: Arc<PrototypeRegistry>) -> Self {
        Self {
            dims,
            registry,
            chunks: HashMap::new(),
            view_distance: view_distance.max(0),
            center: ChunkPosition::default(),
        }
    }

    pub fn from_config(cfg: &WorldConfig, registry: Arc<PrototypeRegistry>) -> Result<Self, Box<dyn Error>> {
        let dims = cfg.chunk.dims()?;
        Ok(Self::new(dims, cfg.view_distance, registry))
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn registry(&self) -> &Arc<PrototypeRegistry> {
        &self.registry
    }

    #[inline]
    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    #[inline]
    pub fn center(&self) -> ChunkPosition {
        self.center
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.dims.sy as i32
    }

    pub fn block_at(&self, pos: BlockPosition) -> BlockPrototype {
        match pos.split(self.dims) {
            Some((cp, rel)) => self
                .chunks
                .get(&cp)
                .map_or(BlockPrototype::Void, |c| c.block(rel)),
            None => BlockPrototype::Void,
        }
    }

    /// Returns `false` when `pos` is not inside a loaded chunk. `Void` only
    /// marks unloaded space and is never stored.
    pub fn set_block_prototype(&mut self, pos: BlockPosition, prototype: BlockPrototype) -> bool {
        if prototype == BlockPrototype::Void {
            return false;
        }
        let Some((cp, rel)) = pos.split(self.dims) else {
            return false;
        };
        match self.chunks.get_mut(&cp) {
            Some(c) => c.set_block_prototype(rel, prototype),
            None => false,
        }
    }

    pub fn light_level(&self, pos: BlockPosition) -> u8 {
        match pos.split(self.dims) {
            Some((cp, rel)) => self.chunks.get(&cp).map_or(0, |c| c.light_level(rel)),
            None => 0,
        }
    }

    /// Returns `false` when `pos` is not inside a loaded chunk.
    pub fn set_light_level(&mut self, pos: BlockPosition, level: u8) -> bool {
        let Some((cp, rel)) = pos.split(self.dims) else {
            return false;
        };
        match self.chunks.get_mut(&cp) {
            Some(c) => {
                c.set_light_level(rel, level);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn chunk(&self, cp: ChunkPosition) -> Option<&Chunk> {
        self.chunks.get(&cp)
    }

    #[inline]
    pub fn chunk_mut(&mut self, cp: ChunkPosition) -> Option<&mut Chunk> {
        self.chunks.get_mut(&cp)
    }

    #[inline]
    pub fn contains_chunk(&self, cp: ChunkPosition) -> bool {
        self.chunks.contains_key(&cp)
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Loaded positions in a stable order.
    pub fn chunk_positions(&self) -> Vec<ChunkPosition> {
        let mut out: Vec<ChunkPosition> = self.chunks.keys().copied().collect();
        out.sort();
        out
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The chunk and its loaded lateral neighbors.
    pub fn neighborhood(&self, cp: ChunkPosition) -> impl Iterator<Item = &Chunk> {
        std::iter::once(cp)
            .chain(cp.neighbors())
            .filter_map(|p| self.chunks.get(&p))
    }

    /// True when every lateral neighbor of `cp` is loaded.
    pub fn has_all_neighbors(&self, cp: ChunkPosition) -> bool {
        cp.neighbors().iter().all(|n| self.chunks.contains_key(n))
    }

    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.position(), chunk)
    }

    pub fn remove_chunk(&mut self, cp: ChunkPosition) -> Option<Chunk> {
        self.chunks.remove(&cp)
    }

    #[inline]
    pub fn in_view(&self, cp: ChunkPosition) -> bool {
        cp.chebyshev_distance(self.center) <= self.view_distance
    }

    /// Loads and generates every missing chunk within view of the current
    /// center. Returns the newly created positions.
    pub fn generate(&mut self, generator: &dyn ChunkGenerator) -> Vec<ChunkPosition> {
        let missing: Vec<ChunkPosition> = self
            .center
            .square(self.view_distance)
            .filter(|cp| !self.chunks.contains_key(cp))
            .collect();
        if missing.is_empty() {
            return missing;
        }
        let dims = self.dims;
        let registry = &self.registry;
        // Each chunk owns its arrays, so generation parallelizes freely.
        let fresh: Vec<Chunk> = missing
            .par_iter()
            .map(|&cp| {
                let mut chunk = Chunk::new(cp, dims, Arc::clone(registry));
                chunk.generate(generator);
                chunk
            })
            .collect();
        for chunk in fresh {
            self.chunks.insert(chunk.position(), chunk);
        }
        log::debug!(target: "world", "generated {} chunk(s) around {}", missing.len(), self.center);
        missing
    }

    /// Moves the view center: drops chunks now out of range and generates
    /// the ones that came into range.
    pub fn set_center(&mut self, center: ChunkPosition, generator: &dyn ChunkGenerator) -> StreamDelta {
        self.center = center;
        let mut unloaded: Vec<ChunkPosition> = self
            .chunks
            .keys()
            .copied()
            .filter(|cp| cp.chebyshev_distance(center) > self.view_distance)
            .collect();
        unloaded.sort();
        for cp in &unloaded {
            self.chunks.remove(cp);
        }
        let loaded = self.generate(generator);
        if !unloaded.is_empty() || !loaded.is_empty() {
            log::info!(
                target: "world",
                "view center {}: +{} -{} chunk(s), {} loaded",
                center,
                loaded.len(),
                unloaded.len(),
                self.chunks.len()
            );
        }
        StreamDelta { loaded, unloaded }
    }
}
