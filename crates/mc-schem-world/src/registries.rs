//! Shared, read-only lookup services used while decoding.

use std::sync::Arc;

use crate::block_types::BlockTypeRegistry;
use crate::entity::EntityTypeRegistry;
use crate::error::RegistryError;
use crate::legacy::{LegacyBlockResolver, LegacyMapper};

/// Registries handed to decoders. Cloning shares the underlying tables.
#[derive(Clone)]
pub struct Registries {
    pub legacy: Arc<dyn LegacyBlockResolver>,
    pub block_types: Arc<BlockTypeRegistry>,
    pub entity_types: Arc<EntityTypeRegistry>,
}

impl Registries {
    /// All registries built from the embedded data tables.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::with_resolver(Arc::new(LegacyMapper::bundled()?))
    }

    /// Bundled block and entity registries around the given legacy resolver.
    pub fn with_resolver(legacy: Arc<dyn LegacyBlockResolver>) -> Result<Self, RegistryError> {
        Ok(Self {
            legacy,
            block_types: Arc::new(BlockTypeRegistry::bundled()?),
            entity_types: Arc::new(EntityTypeRegistry::new()),
        })
    }

    /// Replace the legacy resolver, keeping the other registries.
    pub fn with_legacy(mut self, legacy: Arc<dyn LegacyBlockResolver>) -> Self {
        self.legacy = legacy;
        self
    }
}

impl std::fmt::Debug for Registries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registries")
            .field("block_types", &self.block_types.len())
            .field("entity_types", &self.entity_types.len())
            .finish_non_exhaustive()
    }
}
