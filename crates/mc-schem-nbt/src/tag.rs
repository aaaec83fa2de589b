//! NBT tag types.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::NbtError;

/// A compound tag: map of name -> tag.
///
/// Keys are unique; a `BTreeMap` keeps iteration (and therefore re-encoding)
/// deterministic.
pub type NbtCompound = BTreeMap<String, NbtTag>;

/// A named root compound (the root always has a name, often empty string).
#[derive(Debug, Clone, PartialEq)]
pub struct NbtRoot {
    pub name: String,
    pub compound: NbtCompound,
}

impl NbtRoot {
    pub fn new(name: impl Into<String>, compound: NbtCompound) -> Self {
        Self {
            name: name.into(),
            compound,
        }
    }
}

/// The kind byte that prefixes every named tag and every list payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagKind {
    pub fn from_id(id: u8) -> Result<Self, NbtError> {
        Ok(match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            other => return Err(NbtError::UnknownTagType(other)),
        })
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagKind::End => "TAG_End",
            TagKind::Byte => "TAG_Byte",
            TagKind::Short => "TAG_Short",
            TagKind::Int => "TAG_Int",
            TagKind::Long => "TAG_Long",
            TagKind::Float => "TAG_Float",
            TagKind::Double => "TAG_Double",
            TagKind::ByteArray => "TAG_Byte_Array",
            TagKind::String => "TAG_String",
            TagKind::List => "TAG_List",
            TagKind::Compound => "TAG_Compound",
            TagKind::IntArray => "TAG_Int_Array",
            TagKind::LongArray => "TAG_Long_Array",
        };
        f.write_str(name)
    }
}

/// Represents any NBT value.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtTag {
    /// Build a list tag, rejecting elements of mixed kinds.
    pub fn list(items: Vec<NbtTag>) -> Result<Self, NbtError> {
        if let Some(first) = items.first() {
            let expected = first.kind();
            if let Some(bad) = items.iter().find(|t| t.kind() != expected) {
                return Err(NbtError::HeterogeneousList {
                    expected,
                    found: bad.kind(),
                });
            }
        }
        Ok(NbtTag::List(items))
    }

    pub fn kind(&self) -> TagKind {
        match self {
            NbtTag::Byte(_) => TagKind::Byte,
            NbtTag::Short(_) => TagKind::Short,
            NbtTag::Int(_) => TagKind::Int,
            NbtTag::Long(_) => TagKind::Long,
            NbtTag::Float(_) => TagKind::Float,
            NbtTag::Double(_) => TagKind::Double,
            NbtTag::ByteArray(_) => TagKind::ByteArray,
            NbtTag::String(_) => TagKind::String,
            NbtTag::List(_) => TagKind::List,
            NbtTag::Compound(_) => TagKind::Compound,
            NbtTag::IntArray(_) => TagKind::IntArray,
            NbtTag::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Returns the numeric tag type ID (1-12). TAG_End is 0 but not representable here.
    pub fn tag_type_id(&self) -> u8 {
        self.kind().id()
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            NbtTag::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            NbtTag::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            NbtTag::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            NbtTag::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            NbtTag::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            NbtTag::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            NbtTag::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&NbtCompound> {
        match self {
            NbtTag::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[NbtTag]> {
        match self {
            NbtTag::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            NbtTag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            NbtTag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            NbtTag::LongArray(v) => Some(v),
            _ => None,
        }
    }

    /// Any numeric tag, truncated to `i32`. Strings and containers give `None`.
    pub fn as_i32_lossy(&self) -> Option<i32> {
        match self {
            NbtTag::Byte(v) => Some(*v as i32),
            NbtTag::Short(v) => Some(*v as i32),
            NbtTag::Int(v) => Some(*v),
            NbtTag::Long(v) => Some(*v as i32),
            NbtTag::Float(v) => Some(*v as i32),
            NbtTag::Double(v) => Some(*v as i32),
            _ => None,
        }
    }

    /// Any numeric tag, widened to `f64`.
    pub fn as_f64_lossy(&self) -> Option<f64> {
        match self {
            NbtTag::Byte(v) => Some(*v as f64),
            NbtTag::Short(v) => Some(*v as f64),
            NbtTag::Int(v) => Some(*v as f64),
            NbtTag::Long(v) => Some(*v as f64),
            NbtTag::Float(v) => Some(*v as f64),
            NbtTag::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for NbtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NbtTag::Byte(v) => write!(f, "{v}b"),
            NbtTag::Short(v) => write!(f, "{v}s"),
            NbtTag::Int(v) => write!(f, "{v}"),
            NbtTag::Long(v) => write!(f, "{v}L"),
            NbtTag::Float(v) => write!(f, "{v}f"),
            NbtTag::Double(v) => write!(f, "{v}d"),
            NbtTag::ByteArray(v) => write!(f, "[B; {} elements]", v.len()),
            NbtTag::String(v) => write!(f, "\"{v}\""),
            NbtTag::List(v) => write!(f, "[{} elements]", v.len()),
            NbtTag::Compound(v) => write!(f, "{{{} entries}}", v.len()),
            NbtTag::IntArray(v) => write!(f, "[I; {} elements]", v.len()),
            NbtTag::LongArray(v) => write!(f, "[L; {} elements]", v.len()),
        }
    }
}
