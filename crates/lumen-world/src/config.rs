use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use lumen_chunk::{ChunkDims, ChunkGenerator, DimsError};

use crate::generation::{EmptyGenerator, FlatGenerator, NoiseGenerator};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default)]
    pub chunk: ChunkSize,
    /// Radius, in chunks, kept loaded around the view center.
    #[serde(default = "default_view_distance")]
    pub view_distance: i32,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk: ChunkSize::default(),
            view_distance: default_view_distance(),
            generator: GeneratorConfig::default(),
        }
    }
}

fn default_view_distance() -> i32 {
    2
}

impl WorldConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldConfig = toml::from_str(toml_str)?;
        cfg.chunk.dims()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ChunkSize {
    #[serde(default = "default_footprint")]
    pub x: usize,
    #[serde(default = "default_height")]
    pub y: usize,
    #[serde(default = "default_footprint")]
    pub z: usize,
}

fn default_footprint() -> usize {
    16
}
fn default_height() -> usize {
    128
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self {
            x: default_footprint(),
            y: default_height(),
            z: default_footprint(),
        }
    }
}

impl ChunkSize {
    pub fn dims(&self) -> Result<ChunkDims, DimsError> {
        ChunkDims::new(self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorConfig {
    Empty,
    Flat {
        #[serde(default = "default_ground_level")]
        ground_level: i32,
    },
    Noise {
        #[serde(default)]
        seed: i32,
        #[serde(default = "default_ground_level")]
        base_height: i32,
        #[serde(default = "default_amplitude")]
        amplitude: f32,
        #[serde(default = "default_frequency")]
        frequency: f32,
        #[serde(default = "default_beach_level")]
        beach_level: i32,
    },
}

fn default_ground_level() -> i32 {
    64
}
fn default_amplitude() -> f32 {
    12.0
}
fn default_frequency() -> f32 {
    0.01
}
fn default_beach_level() -> i32 {
    58
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::Flat {
            ground_level: default_ground_level(),
        }
    }
}

impl GeneratorConfig {
    pub fn build(&self) -> Box<dyn ChunkGenerator> {
        match *self {
            GeneratorConfig::Empty => Box::new(EmptyGenerator),
            GeneratorConfig::Flat { ground_level } => Box::new(FlatGenerator::new(ground_level)),
            GeneratorConfig::Noise {
                seed,
                base_height,
                amplitude,
                frequency,
                beach_level,
            } => Box::new(NoiseGenerator {
                seed,
                base_height,
                amplitude,
                frequency,
                beach_level,
            }),
        }
    }

    /// Replaces the noise seed; other generators ignore it.
    pub fn with_seed(mut self, new_seed: i32) -> Self {
        if let GeneratorConfig::Noise { seed, .. } = &mut self {
            *seed = new_seed;
        }
        self
    }
}
