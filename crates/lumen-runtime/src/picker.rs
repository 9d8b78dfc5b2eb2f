use lumen_blocks::BlockPrototype;
use lumen_chunk::BlockPosition;
use lumen_geom::{Aabb, Axis, Vec3};
use lumen_world::World;

use crate::event::Notification;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedBlock {
    pub position: BlockPosition,
    pub prototype: BlockPrototype,
}

/// Result of a pick. `place` is the see-through voxel the ray crossed just
/// before the hit, where a new block would go; it is only set on a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockSelection {
    pub block: Option<SelectedBlock>,
    pub place: Option<BlockPosition>,
}

impl BlockSelection {
    pub const NONE: BlockSelection = BlockSelection { block: None, place: None };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.block.is_some()
    }
}

/// Voxel-walking ray picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockPicker {
    pub max_distance: f32,
}

impl Default for BlockPicker {
    fn default() -> Self {
        Self { max_distance: 8.0 }
    }
}

impl BlockPicker {
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    /// Notifications after which the selection may be stale.
    pub fn wants(&self, notification: &Notification) -> bool {
        matches!(notification, Notification::CameraMoved | Notification::ChunkRebuilt(_))
    }

    /// Walks voxel by voxel from `origin` along `look` and stops at the first
    /// block that cannot be seen through. The voxel holding `origin` itself
    /// is never selected.
    pub fn pick(&self, world: &World, origin: Vec3, look: Vec3) -> BlockSelection {
        if !origin.is_finite() || !look.is_finite() || look.length() < 1e-6 {
            return BlockSelection::NONE;
        }
        let dir = look.normalized();
        let mut voxel = BlockPosition::containing(origin);
        let mut travelled = 0.0f32;
        // A ray grazing edges can take zero-length steps; bound the walk.
        let max_steps = (self.max_distance.max(0.0).ceil() as usize + 1) * 3;
        for _ in 0..max_steps {
            let point = origin + dir * travelled;
            let Some(exit) = Aabb::unit_at(voxel.to_vec3()).exit(point, dir) else {
                break;
            };
            travelled += exit.t;
            if travelled > self.max_distance {
                break;
            }
            let stepped = match exit.axis {
                Axis::X => voxel.checked_offset(exit.sign, 0, 0),
                Axis::Y => voxel.checked_offset(0, exit.sign, 0),
                Axis::Z => voxel.checked_offset(0, 0, exit.sign),
            };
            // No voxel beyond the i32 range.
            let Some(next) = stepped else {
                break;
            };
            let prototype = world.block_at(next);
            if !prototype.can_be_seen_through() {
                return BlockSelection {
                    block: Some(SelectedBlock { position: next, prototype }),
                    place: Some(voxel),
                };
            }
            voxel = next;
        }
        BlockSelection::NONE
    }
}
