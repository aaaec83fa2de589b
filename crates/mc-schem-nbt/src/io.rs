//! Big-endian (Java Edition) NBT read/write engine.
//!
//! Layout of a named tag: `[kind:u8][name_len:u16][name][payload]`. Payloads
//! of arrays, strings and lists are length-prefixed with big-endian integers.

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::tag::{NbtCompound, NbtRoot, NbtTag, TagKind};

/// Maximum nesting depth to prevent stack overflow.
const MAX_DEPTH: usize = 512;

// -----------------------------------------------------------------------
// Reading
// -----------------------------------------------------------------------

pub(crate) fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    if !buf.has_remaining() {
        return Err(NbtError::UnexpectedEof);
    }
    let tag_type = buf.get_u8();
    if tag_type != TagKind::Compound.id() {
        return Err(NbtError::ExpectedCompound { got: tag_type });
    }
    let name = read_string(buf)?;
    let compound = read_compound(buf, 0)?;
    Ok(NbtRoot { name, compound })
}

fn read_tag(buf: &mut impl Buf, kind: TagKind, depth: usize) -> Result<NbtTag, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }

    match kind {
        // TAG_End never carries a payload; only list headers may name it.
        TagKind::End => Err(NbtError::UnknownTagType(0)),
        TagKind::Byte => {
            ensure_remaining(buf, 1)?;
            Ok(NbtTag::Byte(buf.get_i8()))
        }
        TagKind::Short => {
            ensure_remaining(buf, 2)?;
            Ok(NbtTag::Short(buf.get_i16()))
        }
        TagKind::Int => {
            ensure_remaining(buf, 4)?;
            Ok(NbtTag::Int(buf.get_i32()))
        }
        TagKind::Long => {
            ensure_remaining(buf, 8)?;
            Ok(NbtTag::Long(buf.get_i64()))
        }
        TagKind::Float => {
            ensure_remaining(buf, 4)?;
            Ok(NbtTag::Float(buf.get_f32()))
        }
        TagKind::Double => {
            ensure_remaining(buf, 8)?;
            Ok(NbtTag::Double(buf.get_f64()))
        }
        TagKind::ByteArray => {
            let len = read_len(buf)?;
            ensure_remaining(buf, len)?;
            let data = buf.copy_to_bytes(len);
            Ok(NbtTag::ByteArray(data.iter().map(|&b| b as i8).collect()))
        }
        TagKind::String => Ok(NbtTag::String(read_string(buf)?)),
        TagKind::List => {
            ensure_remaining(buf, 1)?;
            let element_kind = TagKind::from_id(buf.get_u8())?;
            ensure_remaining(buf, 4)?;
            let raw_len = buf.get_i32();
            if raw_len < 0 {
                return Err(NbtError::NegativeLength(raw_len));
            }
            if element_kind == TagKind::End && raw_len > 0 {
                return Err(NbtError::InvalidListType { len: raw_len });
            }
            let len = raw_len as usize;
            // Every element is at least one byte, so cap the pre-allocation.
            let mut list = Vec::with_capacity(len.min(buf.remaining()));
            for _ in 0..len {
                list.push(read_tag(buf, element_kind, depth + 1)?);
            }
            Ok(NbtTag::List(list))
        }
        TagKind::Compound => Ok(NbtTag::Compound(read_compound(buf, depth + 1)?)),
        TagKind::IntArray => {
            let len = read_len(buf)?;
            ensure_remaining(buf, len.saturating_mul(4))?;
            let mut arr = Vec::with_capacity(len);
            for _ in 0..len {
                arr.push(buf.get_i32());
            }
            Ok(NbtTag::IntArray(arr))
        }
        TagKind::LongArray => {
            let len = read_len(buf)?;
            ensure_remaining(buf, len.saturating_mul(8))?;
            let mut arr = Vec::with_capacity(len);
            for _ in 0..len {
                arr.push(buf.get_i64());
            }
            Ok(NbtTag::LongArray(arr))
        }
    }
}

fn read_compound(buf: &mut impl Buf, depth: usize) -> Result<NbtCompound, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }
    let mut map = NbtCompound::new();
    loop {
        ensure_remaining(buf, 1)?;
        let kind = TagKind::from_id(buf.get_u8())?;
        if kind == TagKind::End {
            break;
        }
        let name = read_string(buf)?;
        let tag = read_tag(buf, kind, depth)?;
        map.insert(name, tag);
    }
    Ok(map)
}

fn read_len(buf: &mut impl Buf) -> Result<usize, NbtError> {
    ensure_remaining(buf, 4)?;
    let len = buf.get_i32();
    if len < 0 {
        return Err(NbtError::NegativeLength(len));
    }
    Ok(len as usize)
}

fn read_string(buf: &mut impl Buf) -> Result<String, NbtError> {
    ensure_remaining(buf, 2)?;
    let len = buf.get_u16() as usize;
    ensure_remaining(buf, len)?;
    let data = buf.copy_to_bytes(len);
    // Java writes modified UTF-8: NUL as C0 80, supplementary chars as surrogate pairs.
    cesu8::from_java_cesu8(&data)
        .map(|s| s.into_owned())
        .map_err(|_| NbtError::InvalidUtf8)
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), NbtError> {
    if buf.remaining() < needed {
        Err(NbtError::UnexpectedEof)
    } else {
        Ok(())
    }
}

// -----------------------------------------------------------------------
// Writing
// -----------------------------------------------------------------------

pub(crate) fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) {
    buf.put_u8(TagKind::Compound.id());
    write_string(buf, &root.name);
    write_compound(buf, &root.compound);
}

fn write_tag(buf: &mut impl BufMut, tag: &NbtTag) {
    match tag {
        NbtTag::Byte(v) => buf.put_i8(*v),
        NbtTag::Short(v) => buf.put_i16(*v),
        NbtTag::Int(v) => buf.put_i32(*v),
        NbtTag::Long(v) => buf.put_i64(*v),
        NbtTag::Float(v) => buf.put_f32(*v),
        NbtTag::Double(v) => buf.put_f64(*v),
        NbtTag::ByteArray(arr) => {
            buf.put_i32(arr.len() as i32);
            for &b in arr {
                buf.put_i8(b);
            }
        }
        NbtTag::String(s) => write_string(buf, s),
        NbtTag::List(list) => {
            if list.is_empty() {
                buf.put_u8(TagKind::End.id());
                buf.put_i32(0);
            } else {
                debug_assert!(list.iter().all(|t| t.kind() == list[0].kind()));
                buf.put_u8(list[0].tag_type_id());
                buf.put_i32(list.len() as i32);
                for item in list {
                    write_tag(buf, item);
                }
            }
        }
        NbtTag::Compound(map) => write_compound(buf, map),
        NbtTag::IntArray(arr) => {
            buf.put_i32(arr.len() as i32);
            for &v in arr {
                buf.put_i32(v);
            }
        }
        NbtTag::LongArray(arr) => {
            buf.put_i32(arr.len() as i32);
            for &v in arr {
                buf.put_i64(v);
            }
        }
    }
}

fn write_compound(buf: &mut impl BufMut, map: &NbtCompound) {
    for (name, tag) in map {
        buf.put_u8(tag.tag_type_id());
        write_string(buf, name);
        write_tag(buf, tag);
    }
    buf.put_u8(TagKind::End.id());
}

fn write_string(buf: &mut impl BufMut, s: &str) {
    let encoded = cesu8::to_java_cesu8(s);
    buf.put_u16(encoded.len() as u16);
    buf.put_slice(&encoded);
}
