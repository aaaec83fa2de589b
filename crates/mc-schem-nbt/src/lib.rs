//! NBT (Named Binary Tag) implementation for Java Edition files.
//!
//! All integers are big-endian and string lengths are `u16`. Files on disk are
//! usually gzip-compressed; [`read_nbt_from`] sniffs the gzip magic and
//! decompresses with `flate2` before parsing.

pub mod compound;
pub mod error;
mod io;
pub mod tag;

pub use compound::{CompoundExt, ListExt};
pub use error::NbtError;
pub use tag::{NbtCompound, NbtRoot, NbtTag, TagKind};

use std::io::Read;

use bytes::{Buf, BufMut};
use flate2::read::GzDecoder;

/// First two bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read uncompressed big-endian NBT from a buffer.
pub fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt(buf)
}

/// Write uncompressed big-endian NBT to a buffer.
pub fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) {
    io::write_nbt(buf, root)
}

/// Read a gzip-compressed NBT stream.
pub fn read_nbt_gzip(reader: impl Read) -> Result<NbtRoot, NbtError> {
    let mut data = Vec::new();
    GzDecoder::new(reader).read_to_end(&mut data)?;
    read_nbt(&mut data.as_slice())
}

/// Read an NBT stream that may or may not be gzip-compressed.
pub fn read_nbt_from(mut reader: impl Read) -> Result<NbtRoot, NbtError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    if data.starts_with(&GZIP_MAGIC) {
        read_nbt_gzip(data.as_slice())
    } else {
        read_nbt(&mut data.as_slice())
    }
}
