use crate::chunk::Chunk;

/// Fills a freshly created chunk. Implementations call
/// [`Chunk::set_block_prototype`] for every voxel; how prototypes are chosen is
/// up to them. Generators run on worker threads, one chunk each.
pub trait ChunkGenerator: Send + Sync {
    fn generate(&self, chunk: &mut Chunk);
}

impl<G: ChunkGenerator + ?Sized> ChunkGenerator for Box<G> {
    fn generate(&self, chunk: &mut Chunk) {
        (**self).generate(chunk)
    }
}
