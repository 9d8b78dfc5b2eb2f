use std::collections::BTreeSet;

use lumen_blocks::MAXIMUM_LIGHT_LEVEL;
use lumen_chunk::{BlockPosition, ChunkPosition, RelativeBlockPosition};
use lumen_world::World;

use crate::propagate::LightPropagator;

/// Casts vertical sunlight through every column of one chunk and nothing
/// else: full light down to the first block that stops it, darkness below.
/// Neighbor chunks are not touched, so freshly generated (still dark)
/// neighbors cost nothing here. Returns `false` if the chunk is not loaded.
pub fn set_initial_lighting(world: &mut World, cp: ChunkPosition) -> bool {
    let Some(chunk) = world.chunk_mut(cp) else {
        return false;
    };
    let dims = chunk.dims();
    let mut lowest_sunlit = dims.sy as i32;
    for z in 0..dims.sz() {
        for x in 0..dims.sx() {
            let mut open = true;
            for y in (0..dims.sy).rev() {
                let rel = RelativeBlockPosition::new(x, y, z);
                if open && chunk.block(rel).can_propagate_light() {
                    chunk.set_light_level(rel, MAXIMUM_LIGHT_LEVEL);
                    lowest_sunlit = lowest_sunlit.min(y as i32);
                } else {
                    open = false;
                    chunk.set_light_level(rel, 0);
                }
            }
        }
    }
    chunk.set_lowest_sunlit_block(lowest_sunlit);
    true
}

/// Spreads sunlight sideways from every directly sunlit block of the chunk,
/// into this chunk and across its borders. Only rows between the lowest
/// sunlit block and the highest visible block of the neighborhood can hold
/// a source with somewhere new to go; the four edge columns are scanned at
/// every height since a taller neighbor can shine into them.
///
/// Initial lighting must have run for this chunk and its loaded neighbors.
/// Returns the number of light levels written.
pub fn calculate_lighting(world: &mut World, cp: ChunkPosition, propagator: &mut LightPropagator) -> usize {
    let sources = sunlit_sources(world, cp);
    let before = propagator.writes();
    for pos in sources {
        propagator.propagate_from_sunlit(world, pos);
    }
    propagator.writes() - before
}

fn sunlit_sources(world: &World, cp: ChunkPosition) -> Vec<BlockPosition> {
    let Some(chunk) = world.chunk(cp) else {
        return Vec::new();
    };
    let dims = chunk.dims();
    let top = world
        .neighborhood(cp)
        .map(|c| c.highest_visible_block())
        .max()
        .unwrap_or(-1)
        .min(dims.sy as i32 - 1);
    let bottom = chunk.lowest_sunlit_block().max(0);
    let mut sources = Vec::new();
    let is_source = |rel: RelativeBlockPosition| {
        chunk.light_level(rel) == MAXIMUM_LIGHT_LEVEL && chunk.block(rel).can_propagate_light()
    };
    for z in 0..dims.sz() {
        for x in 0..dims.sx() {
            let rows = if dims.is_edge_column(x, z) {
                0..dims.sy as i32
            } else {
                bottom..top + 1
            };
            for y in rows {
                let rel = RelativeBlockPosition::new(x, y as usize, z);
                if is_source(rel) {
                    sources.push(rel.to_absolute(cp, dims));
                }
            }
        }
    }
    sources
}

/// Lights a batch of chunks from scratch: sunlight for all of them first,
/// then lateral spreading for each. Loaded chunks within light reach of the
/// batch are also re-spread so their sunlight flows into the new chunks.
pub fn light_chunks(world: &mut World, chunks: &[ChunkPosition]) -> LightingReport {
    for &cp in chunks {
        set_initial_lighting(world, cp);
    }
    let reach = world.dims().light_reach_chunks(MAXIMUM_LIGHT_LEVEL);
    let spread = loaded_within(world, chunks, reach);
    let neighbors: Vec<ChunkPosition> = spread.iter().copied().filter(|cp| !chunks.contains(cp)).collect();
    let before = snapshot(world, &neighbors);
    let mut propagator = LightPropagator::new();
    for &cp in &spread {
        calculate_lighting(world, cp, &mut propagator);
    }
    let mut changed: Vec<ChunkPosition> = chunks.iter().copied().filter(|cp| world.contains_chunk(*cp)).collect();
    changed.extend(changed_since(world, before));
    changed.sort();
    let report = LightingReport {
        reset: chunks.to_vec(),
        recalculated: spread,
        changed,
        writes: propagator.writes(),
    };
    log::debug!(
        target: "lighting",
        "lit {} chunk(s), spread {} chunk(s), {} write(s)",
        report.reset.len(),
        report.recalculated.len(),
        report.writes
    );
    report
}

/// Rebuilds lighting after blocks changed (or chunks were dropped) at the
/// given chunk positions. Every loaded chunk that light could have crossed
/// into from there is recast from scratch, then every chunk that could shine
/// into those is spread again. Light never decreases during a spread, so
/// the reset is what removes light that can no longer be received.
pub fn relight_around(world: &mut World, edited: &[ChunkPosition]) -> LightingReport {
    let reach = world.dims().light_reach_chunks(MAXIMUM_LIGHT_LEVEL);
    let reset = loaded_within(world, edited, reach);
    let before = snapshot(world, &reset);
    for &cp in &reset {
        set_initial_lighting(world, cp);
    }
    let spread = loaded_within(world, edited, reach * 2);
    let mut propagator = LightPropagator::new();
    for &cp in &spread {
        calculate_lighting(world, cp, &mut propagator);
    }
    // Chunks outside the reset square keep light that stays valid, so only
    // reset chunks can end up different.
    let report = LightingReport {
        changed: changed_since(world, before),
        reset,
        recalculated: spread,
        writes: propagator.writes(),
    };
    log::debug!(
        target: "lighting",
        "relit around {} chunk(s): reset {}, spread {}, changed {}, {} write(s)",
        edited.len(),
        report.reset.len(),
        report.recalculated.len(),
        report.changed.len(),
        report.writes
    );
    report
}

/// Loaded chunks within `radius` (Chebyshev) of any of `centers`, sorted.
fn loaded_within(world: &World, centers: &[ChunkPosition], radius: i32) -> Vec<ChunkPosition> {
    let set: BTreeSet<ChunkPosition> = centers
        .iter()
        .flat_map(|c| c.square(radius))
        .filter(|cp| world.contains_chunk(*cp))
        .collect();
    set.into_iter().collect()
}

fn snapshot(world: &World, chunks: &[ChunkPosition]) -> Vec<(ChunkPosition, Vec<u8>)> {
    chunks
        .iter()
        .filter_map(|&cp| world.chunk(cp).map(|c| (cp, c.light_levels().to_vec())))
        .collect()
}

fn changed_since(world: &World, before: Vec<(ChunkPosition, Vec<u8>)>) -> Vec<ChunkPosition> {
    before
        .into_iter()
        .filter(|(cp, old)| world.chunk(*cp).is_some_and(|c| c.light_levels() != old.as_slice()))
        .map(|(cp, _)| cp)
        .collect()
}

/// What a lighting pass touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LightingReport {
    /// Chunks whose sunlight was recast.
    pub reset: Vec<ChunkPosition>,
    /// Chunks whose sunlit blocks were spread from.
    pub recalculated: Vec<ChunkPosition>,
    /// Loaded chunks whose light levels differ from before the pass, sorted.
    /// Freshly lit chunks always count.
    pub changed: Vec<ChunkPosition>,
    pub writes: usize,
}
