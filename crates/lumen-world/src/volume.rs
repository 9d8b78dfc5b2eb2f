use lumen_blocks::BlockPrototype;
use lumen_chunk::BlockPosition;

use crate::world::World;

/// Inclusive axis-aligned box of block positions. A view over a [`World`],
/// not storage of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockVolume {
    minimum: BlockPosition,
    maximum: BlockPosition,
}

impl BlockVolume {
    /// # Panics
    /// When `minimum` exceeds `maximum` on any axis.
    pub fn new(minimum: BlockPosition, maximum: BlockPosition) -> Self {
        assert!(
            minimum.x <= maximum.x && minimum.y <= maximum.y && minimum.z <= maximum.z,
            "inverted block volume {minimum}..={maximum}"
        );
        Self { minimum, maximum }
    }

    /// Corners in any order.
    pub fn spanning(a: BlockPosition, b: BlockPosition) -> Self {
        Self::new(
            BlockPosition::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            BlockPosition::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        )
    }

    #[inline]
    pub fn minimum(&self) -> BlockPosition {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> BlockPosition {
        self.maximum
    }

    /// Number of block positions, always at least one.
    pub fn block_count(&self) -> usize {
        let dx = (self.maximum.x - self.minimum.x) as usize + 1;
        let dy = (self.maximum.y - self.minimum.y) as usize + 1;
        let dz = (self.maximum.z - self.minimum.z) as usize + 1;
        dx * dy * dz
    }

    #[inline]
    pub fn contains(&self, p: BlockPosition) -> bool {
        (self.minimum.x..=self.maximum.x).contains(&p.x)
            && (self.minimum.y..=self.maximum.y).contains(&p.y)
            && (self.minimum.z..=self.maximum.z).contains(&p.z)
    }

    pub fn positions(&self) -> impl Iterator<Item = BlockPosition> + use<> {
        let (lo, hi) = (self.minimum, self.maximum);
        (lo.y..=hi.y).flat_map(move |y| {
            (lo.z..=hi.z).flat_map(move |z| (lo.x..=hi.x).map(move |x| BlockPosition::new(x, y, z)))
        })
    }

    /// Writes `prototype` everywhere in the volume; returns how many writes
    /// landed in loaded chunks.
    pub fn set_all(&self, world: &mut World, prototype: BlockPrototype) -> usize {
        self.positions()
            .filter(|&p| world.set_block_prototype(p, prototype))
            .count()
    }

    pub fn blocks<'w>(&self, world: &'w World) -> impl Iterator<Item = (BlockPosition, BlockPrototype)> + 'w {
        self.positions().map(move |p| (p, world.block_at(p)))
    }

    pub fn light_levels<'w>(&self, world: &'w World) -> impl Iterator<Item = (BlockPosition, u8)> + 'w {
        self.positions().map(move |p| (p, world.light_level(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanning_orders_corners() {
        let v = BlockVolume::spanning(BlockPosition::new(2, 5, -1), BlockPosition::new(0, 3, 1));
        assert_eq!(v.minimum(), BlockPosition::new(0, 3, -1));
        assert_eq!(v.maximum(), BlockPosition::new(2, 5, 1));
        assert_eq!(v.block_count(), 27);
        assert_eq!(v.positions().count(), 27);
        assert!(v.contains(BlockPosition::new(1, 4, 0)));
        assert!(!v.contains(BlockPosition::new(3, 4, 0)));
    }

    #[test]
    #[should_panic(expected = "inverted block volume")]
    fn inverted_volume_panics() {
        BlockVolume::new(BlockPosition::new(1, 0, 0), BlockPosition::new(0, 0, 0));
    }
}
