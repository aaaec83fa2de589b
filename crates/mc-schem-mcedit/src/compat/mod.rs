//! Compatibility rules that repair payloads written by older game versions.
//!
//! Rules run in registration order. Block rules see the state produced by
//! the previous matching rule; entity rules see the payload produced by the
//! previous matching rule.

mod flower_pot;
mod hanging;
mod note_block;
mod sign;
mod skull;

pub use flower_pot::FlowerPotRule;
pub use hanging::HangingEntityRule;
pub use note_block::NoteBlockRule;
pub use sign::SignTextRule;
pub use skull::SkullRule;

use mc_schem_nbt::NbtCompound;
use mc_schem_world::{BlockState, EntityType, Registries};

/// Fixes up a tile-entity payload and possibly its block state.
pub trait BlockCompatibilityRule: Send + Sync {
    fn matches(&self, state: &BlockState) -> bool;

    /// Edit `nbt` in place and return the state the block should take.
    /// `None` ends the chain and leaves the block at its resolved state.
    fn apply(
        &self,
        state: &BlockState,
        nbt: &mut NbtCompound,
        registries: &Registries,
    ) -> Option<BlockState>;
}

/// Rewrites a saved entity payload.
pub trait EntityCompatibilityRule: Send + Sync {
    fn matches(&self, entity_type: &EntityType, nbt: &NbtCompound) -> bool;

    fn apply(&self, entity_type: &EntityType, nbt: NbtCompound) -> NbtCompound;
}

/// Ordered block and entity rule chains.
pub struct CompatibilityPipeline {
    block_rules: Vec<Box<dyn BlockCompatibilityRule>>,
    entity_rules: Vec<Box<dyn EntityCompatibilityRule>>,
}

impl Default for CompatibilityPipeline {
    fn default() -> Self {
        Self::empty()
            .with_block_rule(SignTextRule)
            .with_block_rule(FlowerPotRule)
            .with_block_rule(NoteBlockRule)
            .with_block_rule(SkullRule)
            .with_entity_rule(HangingEntityRule)
    }
}

impl CompatibilityPipeline {
    /// A pipeline with no rules.
    pub fn empty() -> Self {
        Self {
            block_rules: Vec::new(),
            entity_rules: Vec::new(),
        }
    }

    /// Append a block rule after the existing ones.
    pub fn with_block_rule(mut self, rule: impl BlockCompatibilityRule + 'static) -> Self {
        self.block_rules.push(Box::new(rule));
        self
    }

    /// Append an entity rule after the existing ones.
    pub fn with_entity_rule(mut self, rule: impl EntityCompatibilityRule + 'static) -> Self {
        self.entity_rules.push(Box::new(rule));
        self
    }

    pub fn block_rule_count(&self) -> usize {
        self.block_rules.len()
    }

    pub fn entity_rule_count(&self) -> usize {
        self.entity_rules.len()
    }

    /// Run the block chain for one tile entity. Returns the override state,
    /// or `None` when the block keeps `resolved`.
    pub fn apply_block(
        &self,
        resolved: &BlockState,
        nbt: &mut NbtCompound,
        registries: &Registries,
    ) -> Option<BlockState> {
        let mut current = resolved.clone();
        for rule in &self.block_rules {
            if rule.matches(&current) {
                current = rule.apply(&current, nbt, registries)?;
            }
        }
        (current != *resolved).then_some(current)
    }

    /// Run the entity chain over one payload.
    pub fn apply_entity(&self, entity_type: &EntityType, nbt: NbtCompound) -> NbtCompound {
        self.entity_rules.iter().fold(nbt, |nbt, rule| {
            if rule.matches(entity_type, &nbt) {
                rule.apply(entity_type, nbt)
            } else {
                nbt
            }
        })
    }
}
