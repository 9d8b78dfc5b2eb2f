/// Highest light level a block can hold (direct sunlight).
pub const MAXIMUM_LIGHT_LEVEL: u8 = 15;

/// Every kind of block the world knows about. Shared by value across all
/// positions of that kind; behavior is a pure function of the variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum BlockPrototype {
    Air,
    Stone,
    Dirt,
    Grass,
    Sand,
    /// Sentinel for everything outside loaded chunks: blocks light, never
    /// hides a neighboring face, cannot be picked.
    Void,
}

impl BlockPrototype {
    pub const ALL: [BlockPrototype; 6] = [
        BlockPrototype::Air,
        BlockPrototype::Stone,
        BlockPrototype::Dirt,
        BlockPrototype::Grass,
        BlockPrototype::Sand,
        BlockPrototype::Void,
    ];

    /// Number of distinct kinds; sizes the registry's reverse table.
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Transmits light into neighbors.
    #[inline]
    pub fn can_propagate_light(self) -> bool {
        matches!(self, BlockPrototype::Air)
    }

    /// Neighboring solid faces are generated against this block.
    #[inline]
    pub fn can_be_seen_through(self) -> bool {
        matches!(self, BlockPrototype::Air | BlockPrototype::Void)
    }

    #[inline]
    pub fn can_be_selected(self) -> bool {
        !matches!(self, BlockPrototype::Air | BlockPrototype::Void)
    }

    /// Counts toward a chunk's visible-height bounds.
    #[inline]
    pub fn can_be_seen(self) -> bool {
        !self.can_be_seen_through()
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockPrototype::Air => "air",
            BlockPrototype::Stone => "stone",
            BlockPrototype::Dirt => "dirt",
            BlockPrototype::Grass => "grass",
            BlockPrototype::Sand => "sand",
            BlockPrototype::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<BlockPrototype> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for BlockPrototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
