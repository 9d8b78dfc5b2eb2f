use std::collections::BTreeSet;
use std::error::Error;
use std::sync::Arc;

use hashbrown::HashMap;
use lumen_blocks::{BlockPalette, BlockPrototype, PrototypeRegistry};
use lumen_chunk::{BlockPosition, ChunkGenerator, ChunkPosition};
use lumen_geom::Vec3;
use lumen_lighting::{light_chunks, relight_around};
use lumen_mesh_cpu::{ChunkMesh, tessellate_chunks};
use lumen_world::World;

use crate::config::EngineConfig;
use crate::event::{Notification, NotificationBus};
use crate::picker::{BlockPicker, BlockSelection};

/// Eye position and view direction; `look` need not be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub location: Vec3,
    pub look: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            location: Vec3::new(0.5, 70.0, 0.5),
            look: Vec3::new(0.0, -1.0, 0.0),
        }
    }
}

/// What one streaming step did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub loaded: Vec<ChunkPosition>,
    pub unloaded: Vec<ChunkPosition>,
    /// Chunks whose light levels changed.
    pub relit: Vec<ChunkPosition>,
    /// Chunks whose mesh was rebuilt, sorted.
    pub rebuilt: Vec<ChunkPosition>,
}

/// Owns the world and everything derived from it, and keeps the derived
/// state in step: streamed chunks are generated, then lit, then meshed, and
/// every edit is relit and remeshed before the call returns.
pub struct Engine {
    world: World,
    generator: Box<dyn ChunkGenerator>,
    palette: BlockPalette,
    meshes: HashMap<ChunkPosition, ChunkMesh>,
    bus: NotificationBus,
    picker: BlockPicker,
    camera: Camera,
    selection: BlockSelection,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self, Box<dyn Error>> {
        let registry = Arc::new(PrototypeRegistry::standard());
        let world = World::from_config(&config.world, registry)?;
        let palette = match &config.palette {
            Some(path) => BlockPalette::from_path(path)
                .map_err(|e| format!("palette {}: {e}", path.display()))?,
            None => BlockPalette::default(),
        };
        Ok(Self::with_parts(
            world,
            config.world.generator.build(),
            palette,
            BlockPicker::new(config.pick_distance),
        ))
    }

    pub fn with_parts(
        world: World,
        generator: Box<dyn ChunkGenerator>,
        palette: BlockPalette,
        picker: BlockPicker,
    ) -> Self {
        Self {
            world,
            generator,
            palette,
            meshes: HashMap::new(),
            bus: NotificationBus::new(),
            picker,
            camera: Camera::default(),
            selection: BlockSelection::NONE,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn palette(&self) -> &BlockPalette {
        &self.palette
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn selection(&self) -> BlockSelection {
        self.selection
    }

    pub fn bus_mut(&mut self) -> &mut NotificationBus {
        &mut self.bus
    }

    pub fn mesh(&self, cp: ChunkPosition) -> Option<&ChunkMesh> {
        self.meshes.get(&cp)
    }

    pub fn meshes(&self) -> impl Iterator<Item = &ChunkMesh> {
        self.meshes.values()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Moves the camera, streaming chunks if it crossed into another chunk,
    /// then refreshes the selection.
    pub fn set_camera(&mut self, camera: Camera) -> StreamReport {
        self.camera = camera;
        let center = BlockPosition::containing(camera.location).chunk_position(self.world.dims());
        let report = if center != self.world.center() || self.world.chunk_count() == 0 {
            self.stream_to(center)
        } else {
            StreamReport::default()
        };
        self.notify(Notification::CameraMoved);
        report
    }

    /// Recenters the loaded square on `center`: drops chunks that left view
    /// along with their meshes, generates the ones that entered, relights
    /// and remeshes whatever that affected.
    pub fn stream_to(&mut self, center: ChunkPosition) -> StreamReport {
        let delta = self.world.set_center(center, &*self.generator);
        let mut relit = BTreeSet::new();
        let mut dirty = BTreeSet::new();
        for cp in &delta.unloaded {
            self.meshes.remove(cp);
        }
        // New chunks get their sunlight before any relight can spread into them.
        if !delta.loaded.is_empty() {
            relit.extend(light_chunks(&mut self.world, &delta.loaded).changed);
            dirty.extend(delta.loaded.iter().flat_map(|cp| cp.neighbors()));
        }
        if !delta.unloaded.is_empty() {
            relit.extend(relight_around(&mut self.world, &delta.unloaded).changed);
            // Borders that now face the Void grow faces.
            dirty.extend(delta.unloaded.iter().flat_map(|cp| cp.neighbors()));
        }
        // Vertex lighting samples across chunk borders.
        dirty.extend(relit.iter().flat_map(|cp| cp.square(1)));
        let rebuilt = self.rebuild(dirty);
        StreamReport {
            loaded: delta.loaded,
            unloaded: delta.unloaded,
            relit: relit.into_iter().collect(),
            rebuilt,
        }
    }

    /// Puts `prototype` at the selection's place position. Returns where it
    /// went, or `None` without a selection, outside loaded chunks, or for a
    /// prototype that is not a block (`Air`, `Void`).
    pub fn place_block(&mut self, prototype: BlockPrototype) -> Option<BlockPosition> {
        if matches!(prototype, BlockPrototype::Air | BlockPrototype::Void) {
            return None;
        }
        let place = self.selection.place?;
        self.edit(place, prototype).then_some(place)
    }

    /// Turns the selected block into air. Returns its position, or `None`
    /// without a selection.
    pub fn destroy_block(&mut self) -> Option<BlockPosition> {
        let target = self.selection.block?.position;
        self.edit(target, BlockPrototype::Air).then_some(target)
    }

    fn edit(&mut self, pos: BlockPosition, prototype: BlockPrototype) -> bool {
        if !self.world.set_block_prototype(pos, prototype) {
            return false;
        }
        log::info!(target: "world", "set {} to {}", pos, prototype);
        let cp = pos.chunk_position(self.world.dims());
        let report = relight_around(&mut self.world, &[cp]);
        let dirty: BTreeSet<ChunkPosition> = cp
            .square(1)
            .chain(report.changed.iter().flat_map(|c| c.square(1)))
            .collect();
        self.rebuild(dirty);
        true
    }

    fn rebuild(&mut self, dirty: BTreeSet<ChunkPosition>) -> Vec<ChunkPosition> {
        let positions: Vec<ChunkPosition> = dirty
            .into_iter()
            .filter(|cp| self.world.contains_chunk(*cp))
            .collect();
        if positions.is_empty() {
            return positions;
        }
        for mesh in tessellate_chunks(&self.world, &positions, &self.palette) {
            self.meshes.insert(mesh.position, mesh);
        }
        for &cp in &positions {
            self.notify(Notification::ChunkRebuilt(cp));
        }
        positions
    }

    fn notify(&mut self, notification: Notification) {
        self.bus.publish(notification);
        if self.picker.wants(&notification) {
            self.selection = self.picker.pick(&self.world, self.camera.location, self.camera.look);
            self.bus.publish(Notification::BlockSelectionChanged(self.selection));
        }
    }
}
