//! Block states: a namespaced type id plus string-valued properties.
//!
//! Text form is `minecraft:oak_sign[rotation=4,waterlogged=false]`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use mc_schem_nbt::NbtCompound;

use crate::error::RegistryError;

pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Prefix bare ids with `minecraft:`.
pub fn namespaced(id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}:{id}")
    }
}

/// An immutable block state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    id: String,
    properties: BTreeMap<String, String>,
}

impl BlockState {
    /// A state with no properties.
    pub fn new(id: &str) -> Self {
        Self {
            id: namespaced(id),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_properties(id: &str, properties: BTreeMap<String, String>) -> Self {
        Self {
            id: namespaced(id),
            properties,
        }
    }

    /// Namespaced type id, e.g. `minecraft:chest`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Type id without its namespace, e.g. `chest`.
    pub fn path(&self) -> &str {
        self.id
            .split_once(':')
            .map(|(_, path)| path)
            .unwrap_or(&self.id)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Copy of this state with one property set.
    pub fn with(&self, key: &str, value: impl ToString) -> Self {
        let mut next = self.clone();
        next.properties.insert(key.to_string(), value.to_string());
        next
    }

    pub fn to_base_block(&self, nbt: Option<NbtCompound>) -> BaseBlock {
        BaseBlock {
            state: self.clone(),
            nbt,
        }
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if !self.properties.is_empty() {
            f.write_str("[")?;
            for (i, (k, v)) in self.properties.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl FromStr for BlockState {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidBlockState(s.to_string());
        let s_trim = s.trim();
        let (id, props) = match s_trim.split_once('[') {
            Some((id, rest)) => (id, Some(rest.strip_suffix(']').ok_or_else(invalid)?)),
            None => (s_trim, None),
        };
        if id.is_empty() || id.contains(|c: char| c.is_whitespace() || c == ']') {
            return Err(invalid());
        }

        let mut properties = BTreeMap::new();
        if let Some(props) = props.filter(|p| !p.is_empty()) {
            for pair in props.split(',') {
                let (k, v) = pair.split_once('=').ok_or_else(invalid)?;
                let (k, v) = (k.trim(), v.trim());
                if k.is_empty() || v.is_empty() {
                    return Err(invalid());
                }
                properties.insert(k.to_string(), v.to_string());
            }
        }
        Ok(Self::with_properties(id, properties))
    }
}

/// A block state together with its tile-entity payload, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseBlock {
    pub state: BlockState,
    pub nbt: Option<NbtCompound>,
}

impl BaseBlock {
    pub fn has_nbt(&self) -> bool {
        self.nbt.is_some()
    }
}

impl From<BlockState> for BaseBlock {
    fn from(state: BlockState) -> Self {
        Self { state, nbt: None }
    }
}
