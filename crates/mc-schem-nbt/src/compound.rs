//! Typed lookups on compounds and lists.
//!
//! `require_*` fail with [`NbtError::MissingTag`] when the key is absent and
//! [`NbtError::WrongTagType`] when it holds another kind. `get_*` return
//! `None` in both cases. The `*_or_default` helpers mirror the lenient getters
//! of older NBT libraries, which read absent or mistyped values as zero/empty.

use crate::error::NbtError;
use crate::tag::{NbtCompound, NbtTag, TagKind};

pub trait CompoundExt {
    /// Look up `key` and check that it holds a tag of `kind`.
    fn require(&self, key: &str, kind: TagKind) -> Result<&NbtTag, NbtError>;

    /// Look up `key` only if it holds a tag of `kind`.
    fn get_tag(&self, key: &str, kind: TagKind) -> Option<&NbtTag>;

    fn require_short(&self, key: &str) -> Result<i16, NbtError> {
        Ok(self.require(key, TagKind::Short)?.as_short().unwrap_or_default())
    }

    fn require_int(&self, key: &str) -> Result<i32, NbtError> {
        Ok(self.require(key, TagKind::Int)?.as_int().unwrap_or_default())
    }

    fn require_string(&self, key: &str) -> Result<&str, NbtError> {
        Ok(self.require(key, TagKind::String)?.as_string().unwrap_or_default())
    }

    fn require_byte_array(&self, key: &str) -> Result<&[i8], NbtError> {
        Ok(self
            .require(key, TagKind::ByteArray)?
            .as_byte_array()
            .unwrap_or_default())
    }

    fn require_list(&self, key: &str) -> Result<&[NbtTag], NbtError> {
        Ok(self.require(key, TagKind::List)?.as_list().unwrap_or_default())
    }

    fn get_byte(&self, key: &str) -> Option<i8> {
        self.get_tag(key, TagKind::Byte).and_then(NbtTag::as_byte)
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        self.get_tag(key, TagKind::Int).and_then(NbtTag::as_int)
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        self.get_tag(key, TagKind::String).and_then(NbtTag::as_string)
    }

    fn get_byte_array(&self, key: &str) -> Option<&[i8]> {
        self.get_tag(key, TagKind::ByteArray)
            .and_then(NbtTag::as_byte_array)
    }

    fn get_list(&self, key: &str) -> Option<&[NbtTag]> {
        self.get_tag(key, TagKind::List).and_then(NbtTag::as_list)
    }

    fn int_or_default(&self, key: &str) -> i32 {
        self.get_int(key).unwrap_or_default()
    }

    fn string_or_default(&self, key: &str) -> &str {
        self.get_string(key).unwrap_or_default()
    }

    fn list_or_empty(&self, key: &str) -> &[NbtTag] {
        self.get_list(key).unwrap_or_default()
    }
}

impl CompoundExt for NbtCompound {
    fn require(&self, key: &str, kind: TagKind) -> Result<&NbtTag, NbtError> {
        let tag = self.get(key).ok_or_else(|| NbtError::MissingTag {
            key: key.to_string(),
        })?;
        if tag.kind() != kind {
            return Err(NbtError::WrongTagType {
                key: key.to_string(),
                expected: kind,
                found: tag.kind(),
            });
        }
        Ok(tag)
    }

    fn get_tag(&self, key: &str, kind: TagKind) -> Option<&NbtTag> {
        self.get(key).filter(|tag| tag.kind() == kind)
    }
}

/// Positional numeric reads on list payloads (`Pos`, `Rotation`, ...).
pub trait ListExt {
    /// Element `index` as `f64`, or `0.0` when absent or not numeric.
    fn double_at(&self, index: usize) -> f64;

    /// Element `index` as `f32`, or `0.0` when absent or not numeric.
    fn float_at(&self, index: usize) -> f32 {
        self.double_at(index) as f32
    }
}

impl ListExt for [NbtTag] {
    fn double_at(&self, index: usize) -> f64 {
        self.get(index)
            .and_then(NbtTag::as_f64_lossy)
            .unwrap_or_default()
    }
}
