use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use clap::Parser;
use lumen_blocks::BlockPrototype;
use lumen_geom::Vec3;
use lumen_runtime::{Camera, Engine, EngineConfig, Notification};

#[derive(Parser, Debug)]
#[command(name = "lumen", about = "Streams, lights and meshes a voxel world around a camera, then picks a block")]
struct Args {
    /// Engine config TOML (world, generator, pick distance, palette)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the loaded radius, in chunks
    #[arg(long)]
    view_distance: Option<i32>,

    /// Override the noise generator seed
    #[arg(long)]
    seed: Option<i32>,

    /// Camera location
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    camera: Option<Vec<f32>>,

    /// Camera look direction
    #[arg(long, num_args = 3, value_names = ["DX", "DY", "DZ"], allow_negative_numbers = true)]
    look: Option<Vec<f32>>,

    /// Place this block (by name) at the selection after picking
    #[arg(long)]
    place: Option<String>,

    /// Destroy the selected block after picking
    #[arg(long)]
    dig: bool,
}

fn vec3(v: &[f32]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(v) = args.view_distance {
        cfg.world.view_distance = v;
    }
    if let Some(seed) = args.seed {
        cfg.world.generator = cfg.world.generator.clone().with_seed(seed);
    }
    let mut engine = Engine::new(&cfg)?;

    let rebuilds = Arc::new(AtomicUsize::new(0));
    {
        let rebuilds = Arc::clone(&rebuilds);
        engine.bus_mut().subscribe(move |n| {
            if let Notification::ChunkRebuilt(_) = n {
                rebuilds.fetch_add(1, Ordering::Relaxed);
            }
        });
    }

    let default_camera = Camera::default();
    let camera = Camera {
        location: args.camera.as_deref().map_or(default_camera.location, vec3),
        look: args.look.as_deref().map_or(default_camera.look, vec3),
    };

    let t0 = Instant::now();
    let report = engine.set_camera(camera);
    log::info!(
        "streamed {} chunk(s) around {}: relit {}, meshed {} in {:.1} ms",
        report.loaded.len(),
        engine.world().center(),
        report.relit.len(),
        report.rebuilt.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    let quads: usize = engine.meshes().map(|m| m.quad_count()).sum();
    let vertices: usize = engine.meshes().map(|m| m.vertex_count()).sum();
    log::info!("{} mesh(es), {} quad(s), {} vertices", engine.mesh_count(), quads, vertices);

    match engine.selection().block {
        Some(b) => log::info!("selected {} at {}", b.prototype, b.position),
        None => log::info!("nothing selectable within {} blocks", cfg.pick_distance),
    }

    if let Some(name) = &args.place {
        let proto = BlockPrototype::from_name(name).ok_or_else(|| format!("unknown block '{name}'"))?;
        match engine.place_block(proto) {
            Some(at) => log::info!("placed {} at {}", proto, at),
            None => log::warn!("could not place {}: no place position, or not a placeable block", proto),
        }
    }
    if args.dig {
        match engine.destroy_block() {
            Some(at) => log::info!("dug out {}", at),
            None => log::warn!("nothing selected to dig"),
        }
    }

    log::info!(
        "{} notification(s), {} chunk rebuild(s)",
        engine.bus_mut().published(),
        rebuilds.load(Ordering::Relaxed)
    );
    Ok(())
}
