//! Legacy (pre-flattening) numeric block id/data lookup.
//!
//! Legacy blocks are addressed by a 12-bit id and a 4-bit data value. The
//! mapping to modern states is pure data: `data/legacy.json` holds
//! `{"blocks": {"<id>:<data>": "<state>"}}`, and a replacement table in the
//! same layout can be loaded from disk.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::block::BlockState;
use crate::error::RegistryError;

/// Bundled legacy table, embedded at compile time.
const BUNDLED_LEGACY_JSON: &str = include_str!("../data/legacy.json");

/// Highest legacy block id (12 bits).
pub const MAX_LEGACY_ID: u16 = 4095;
/// Highest legacy data value (4 bits).
pub const MAX_LEGACY_DATA: u8 = 15;

/// Resolves a legacy id/data pair to a modern block state.
///
/// Implementations are read-only after construction and shared between
/// concurrent decodes.
pub trait LegacyBlockResolver: Send + Sync {
    /// `None` means the pair is unknown.
    fn resolve(&self, id: u16, data: u8) -> Option<&BlockState>;
}

#[derive(Debug, Deserialize)]
struct LegacyDataFile {
    #[serde(default)]
    blocks: BTreeMap<String, String>,
}

/// Table-backed [`LegacyBlockResolver`].
#[derive(Debug, Clone)]
pub struct LegacyMapper {
    blocks: HashMap<(u16, u8), BlockState>,
    reverse: HashMap<BlockState, (u16, u8)>,
}

impl LegacyMapper {
    /// Build the mapper from the embedded table.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_LEGACY_JSON)
    }

    /// Load a replacement table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)?;
        let mapper = Self::from_json(&json)?;
        info!(
            "Loaded {} legacy block mappings from {}",
            mapper.len(),
            path.display()
        );
        Ok(mapper)
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let file: LegacyDataFile = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(file.blocks.len());
        for (key, value) in &file.blocks {
            entries.push((parse_legacy_key(key)?, value.parse::<BlockState>()?));
        }
        // Reverse lookups prefer the lowest id/data pair for a state.
        entries.sort_by_key(|(key, _)| *key);

        let mut blocks = HashMap::with_capacity(entries.len());
        let mut reverse = HashMap::with_capacity(entries.len());
        for (key, state) in entries {
            reverse.entry(state.clone()).or_insert(key);
            blocks.insert(key, state);
        }
        Ok(Self { blocks, reverse })
    }

    pub fn get_block(&self, id: u16, data: u8) -> Option<&BlockState> {
        self.blocks.get(&(id, data))
    }

    /// The legacy id/data pair a state was first registered under.
    pub fn legacy_of(&self, state: &BlockState) -> Option<(u16, u8)> {
        self.reverse.get(state).copied()
    }

    /// Iterate all mapped states (unordered).
    pub fn states(&self) -> impl Iterator<Item = &BlockState> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl LegacyBlockResolver for LegacyMapper {
    fn resolve(&self, id: u16, data: u8) -> Option<&BlockState> {
        self.get_block(id, data)
    }
}

fn parse_legacy_key(key: &str) -> Result<(u16, u8), RegistryError> {
    let invalid = || RegistryError::InvalidLegacyKey(key.to_string());
    let (id, data) = key.split_once(':').ok_or_else(invalid)?;
    let id: u16 = id.parse().map_err(|_| invalid())?;
    let data: u8 = data.parse().map_err(|_| invalid())?;
    if id > MAX_LEGACY_ID || data > MAX_LEGACY_DATA {
        return Err(invalid());
    }
    Ok((id, data))
}
