use std::error::Error;
use std::fmt;

use super::types::BlockPrototype;

/// Chunks store one byte per block, so at most 256 prototypes fit.
pub const MAX_PROTOTYPES: usize = u8::MAX as usize + 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    Overflow { requested: usize },
    AirNotFirst { found: Option<BlockPrototype> },
    Duplicate(BlockPrototype),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Overflow { requested } => write!(
                f,
                "{requested} block prototypes registered, storage index holds at most {MAX_PROTOTYPES}"
            ),
            RegistryError::AirNotFirst { found: Some(p) } => {
                write!(f, "index 0 is reserved for air, got {p}")
            }
            RegistryError::AirNotFirst { found: None } => {
                write!(f, "index 0 is reserved for air, registry is empty")
            }
            RegistryError::Duplicate(p) => write!(f, "block prototype {p} registered twice"),
        }
    }
}

impl Error for RegistryError {}

/// Bidirectional prototype <-> storage byte mapping. Built once at startup,
/// read-only afterwards; share it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct PrototypeRegistry {
    by_index: Vec<BlockPrototype>,
    index_of: [Option<u8>; BlockPrototype::COUNT],
}

impl PrototypeRegistry {
    pub fn new(prototypes: &[BlockPrototype]) -> Result<Self, RegistryError> {
        if prototypes.len() > MAX_PROTOTYPES {
            return Err(RegistryError::Overflow {
                requested: prototypes.len(),
            });
        }
        match prototypes.first() {
            Some(BlockPrototype::Air) => {}
            other => return Err(RegistryError::AirNotFirst { found: other.copied() }),
        }
        let mut index_of = [None; BlockPrototype::COUNT];
        for (i, p) in prototypes.iter().enumerate() {
            let slot = &mut index_of[p.ordinal()];
            if slot.is_some() {
                return Err(RegistryError::Duplicate(*p));
            }
            *slot = Some(i as u8);
        }
        Ok(Self {
            by_index: prototypes.to_vec(),
            index_of,
        })
    }

    /// Registry containing every known prototype in declaration order.
    pub fn standard() -> Self {
        let mut reg = Self {
            by_index: Vec::with_capacity(BlockPrototype::COUNT),
            index_of: [None; BlockPrototype::COUNT],
        };
        for (i, p) in BlockPrototype::ALL.into_iter().enumerate() {
            reg.by_index.push(p);
            reg.index_of[p.ordinal()] = Some(i as u8);
        }
        reg
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    #[inline]
    pub fn index_of(&self, prototype: BlockPrototype) -> Option<u8> {
        self.index_of[prototype.ordinal()]
    }

    /// Unknown indices decode as `Void`; they can only come from a chunk
    /// written against a different registry.
    #[inline]
    pub fn prototype(&self, index: u8) -> BlockPrototype {
        self.by_index
            .get(index as usize)
            .copied()
            .unwrap_or(BlockPrototype::Void)
    }

    pub fn prototypes(&self) -> &[BlockPrototype] {
        &self.by_index
    }
}

impl Default for PrototypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
