//! World model: block states, legacy id tables, type registries and the
//! clipboard volume that structure decoders fill in.

pub mod block;
pub mod block_types;
pub mod clipboard;
pub mod entity;
pub mod error;
pub mod legacy;
pub mod math;
pub mod registries;

pub use block::{BaseBlock, BlockState};
pub use block_types::BlockTypeRegistry;
pub use clipboard::{Clipboard, ClipboardEntity};
pub use entity::{BaseEntity, EntityType, EntityTypeRegistry};
pub use error::RegistryError;
pub use legacy::{LegacyBlockResolver, LegacyMapper};
pub use math::{BlockVector3, CuboidRegion, Location};
pub use registries::Registries;
