//! Schematic decoding errors.

use mc_schem_nbt::NbtError;
use thiserror::Error;

/// A fatal decode failure. No clipboard is produced.
#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("NBT error: {0}")]
    Nbt(#[from] NbtError),

    #[error("tag 'Schematic' does not exist or is not first (found '{0}')")]
    UnexpectedRootName(String),

    #[error("schematic file is missing a 'Blocks' tag")]
    MissingBlocks,

    #[error("schematic materials '{0}' are not supported, expected 'Alpha'")]
    UnsupportedMaterials(String),

    #[error("negative schematic dimension {axis} = {value}")]
    NegativeDimension { axis: &'static str, value: i16 },

    #[error("'{key}' holds {len} entries but the volume needs {needed}")]
    ArrayTooShort {
        key: &'static str,
        len: usize,
        needed: usize,
    },
}
