use std::collections::VecDeque;

use lumen_blocks::MAXIMUM_LIGHT_LEVEL;
use lumen_chunk::{BlockPosition, Direction};
use lumen_world::World;

/// One pending spread: light leaves `position`, which holds `level`.
/// Sunlit origins only spread sideways; the column above is sunlit (or
/// void) and the one below is sunlit (or solid) already.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightingOperation {
    pub position: BlockPosition,
    pub level: u8,
    pub from_sunlight: bool,
}

/// Breadth-first flood fill over the world. The queue is kept between calls
/// so repeated passes reuse its allocation.
#[derive(Debug, Default)]
pub struct LightPropagator {
    queue: VecDeque<LightingOperation>,
    writes: usize,
}

impl LightPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light levels written since construction or the last [`take_writes`](Self::take_writes).
    #[inline]
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn take_writes(&mut self) -> usize {
        std::mem::take(&mut self.writes)
    }

    /// Spreads from a block already holding full sunlight into its four
    /// lateral neighbors and onward.
    pub fn propagate_from_sunlit(&mut self, world: &mut World, position: BlockPosition) {
        debug_assert_eq!(world.light_level(position), MAXIMUM_LIGHT_LEVEL);
        self.queue.push_back(LightingOperation {
            position,
            level: MAXIMUM_LIGHT_LEVEL,
            from_sunlight: true,
        });
        self.drain(world);
    }

    /// Spreads from a lit block into all six neighbors and onward.
    pub fn propagate_from_lit(&mut self, world: &mut World, position: BlockPosition) {
        let level = world.light_level(position);
        if level <= 1 {
            return;
        }
        self.queue.push_back(LightingOperation {
            position,
            level,
            from_sunlight: false,
        });
        self.drain(world);
    }

    fn drain(&mut self, world: &mut World) {
        while let Some(op) = self.queue.pop_front() {
            // A brighter path reached this block after the op was queued;
            // that path has its own op.
            if !op.from_sunlight && world.light_level(op.position) > op.level {
                continue;
            }
            let directions: &[Direction] = if op.from_sunlight {
                &Direction::LATERAL
            } else {
                &Direction::ALL
            };
            let incoming = op.level.saturating_sub(1);
            if incoming < 1 {
                continue;
            }
            for &dir in directions {
                let n = op.position.neighbor(dir);
                if world.light_level(n) >= incoming {
                    continue;
                }
                if !world.block_at(n).can_propagate_light() {
                    continue;
                }
                world.set_light_level(n, incoming);
                self.writes += 1;
                if incoming > 1 {
                    self.queue.push_back(LightingOperation {
                        position: n,
                        level: incoming,
                        from_sunlight: false,
                    });
                }
            }
        }
    }
}
