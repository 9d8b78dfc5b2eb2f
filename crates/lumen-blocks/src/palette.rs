use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::BlockPrototype;

/// Flat RGBA color per prototype, written into every vertex of its faces.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPalette {
    colors: [[u8; 4]; BlockPrototype::COUNT],
}

impl Default for BlockPalette {
    fn default() -> Self {
        let mut colors = [[255, 0, 255, 255]; BlockPrototype::COUNT];
        for p in BlockPrototype::ALL {
            colors[p.ordinal()] = default_color(p);
        }
        Self { colors }
    }
}

fn default_color(p: BlockPrototype) -> [u8; 4] {
    match p {
        BlockPrototype::Air | BlockPrototype::Void => [0, 0, 0, 0],
        BlockPrototype::Stone => [128, 128, 128, 255],
        BlockPrototype::Dirt => [121, 85, 58, 255],
        BlockPrototype::Grass => [96, 159, 56, 255],
        BlockPrototype::Sand => [219, 206, 160, 255],
    }
}

impl BlockPalette {
    #[inline]
    pub fn color(&self, prototype: BlockPrototype) -> [u8; 4] {
        self.colors[prototype.ordinal()]
    }

    pub fn set_color(&mut self, prototype: BlockPrototype, rgba: [u8; 4]) {
        self.colors[prototype.ordinal()] = rgba;
    }

    /// Starts from the built-in colors and applies every `[colors]` entry.
    /// Unknown block names are rejected so typos do not go unnoticed.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        let mut palette = BlockPalette::default();
        // Sort so error reporting is stable across runs.
        let mut entries: Vec<(String, [u8; 4])> = cfg.colors.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, rgba) in entries {
            let proto = BlockPrototype::from_name(&name)
                .ok_or_else(|| format!("palette: unknown block '{name}'"))?;
            palette.set_color(proto, rgba);
        }
        Ok(palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Deserialize)]
struct PaletteConfig {
    #[serde(default)]
    colors: HashMap<String, [u8; 4]>,
}
