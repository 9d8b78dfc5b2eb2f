//! The chunked world, block volumes, generators and world configuration.
#![forbid(unsafe_code)]

pub mod config;
pub mod generation;
mod volume;
mod world;

pub use config::{ChunkSize, GeneratorConfig, WorldConfig};
pub use generation::{EmptyGenerator, FlatGenerator, NoiseGenerator};
pub use volume::BlockVolume;
pub use world::{StreamDelta, World};
