//! NBT error types.

use thiserror::Error;

use crate::tag::TagKind;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("expected TAG_Compound (10) at root, got {got}")]
    ExpectedCompound { got: u8 },

    #[error("unknown tag type: {0}")]
    UnknownTagType(u8),

    #[error("invalid modified UTF-8 in NBT string")]
    InvalidUtf8,

    #[error("nesting too deep (limit: {limit})")]
    NestingTooDeep { limit: usize },

    #[error("negative array length: {0}")]
    NegativeLength(i32),

    #[error("list declares TAG_End elements but has length {len}")]
    InvalidListType { len: i32 },

    #[error("list mixes {expected} and {found} elements")]
    HeterogeneousList { expected: TagKind, found: TagKind },

    #[error("missing tag '{key}'")]
    MissingTag { key: String },

    #[error("tag '{key}' is {found}, expected {expected}")]
    WrongTagType {
        key: String,
        expected: TagKind,
        found: TagKind,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
