//! Block prototypes, the compact index registry and the color palette.
#![forbid(unsafe_code)]

pub mod palette;
pub mod registry;
pub mod types;

pub use palette::BlockPalette;
pub use registry::{PrototypeRegistry, RegistryError};
pub use types::{BlockPrototype, MAXIMUM_LIGHT_LEVEL};
