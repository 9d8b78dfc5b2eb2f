use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use lumen_world::WorldConfig;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub world: WorldConfig,
    /// Farthest a block can be selected from the camera, in blocks.
    #[serde(default = "default_pick_distance")]
    pub pick_distance: f32,
    /// Optional palette TOML; relative paths resolve against the config file.
    #[serde(default)]
    pub palette: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            pick_distance: default_pick_distance(),
            palette: None,
        }
    }
}

fn default_pick_distance() -> f32 {
    8.0
}

impl EngineConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: EngineConfig = toml::from_str(toml_str)?;
        cfg.world.chunk.dims()?;
        if !(cfg.pick_distance.is_finite() && cfg.pick_distance >= 0.0) {
            return Err(format!("pick_distance must be a non-negative number, got {}", cfg.pick_distance).into());
        }
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        if let (Some(palette), Some(dir)) = (cfg.palette.as_mut(), path.parent()) {
            if palette.is_relative() {
                *palette = dir.join(&*palette);
            }
        }
        Ok(cfg)
    }
}
