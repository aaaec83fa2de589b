//! Known modern block types and their default property values.
//!
//! Backed by `data/blocks.json`: `{ "minecraft:id": { "prop": "default" } }`.

use std::collections::{BTreeMap, HashMap};

use crate::block::{namespaced, BlockState};
use crate::error::RegistryError;

/// Bundled block type table, embedded at compile time.
const BUNDLED_BLOCKS_JSON: &str = include_str!("../data/blocks.json");

/// Registry of block types, keyed by namespaced id.
#[derive(Debug, Clone)]
pub struct BlockTypeRegistry {
    defaults: HashMap<String, BlockState>,
}

impl BlockTypeRegistry {
    /// Build the registry from the embedded block table.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_BLOCKS_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;
        let defaults = raw
            .into_iter()
            .map(|(id, props)| {
                let state = BlockState::with_properties(&id, props);
                (state.id().to_string(), state)
            })
            .collect();
        Ok(Self { defaults })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defaults.contains_key(&namespaced(id))
    }

    /// The default state of a block type, or `None` for unknown types.
    pub fn default_state(&self, id: &str) -> Option<BlockState> {
        self.defaults.get(&namespaced(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}
