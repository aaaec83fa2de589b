use mc_schem_nbt::{CompoundExt, NbtCompound};
use mc_schem_world::{BlockState, Registries};

use super::BlockCompatibilityRule;

const MAX_NOTE: i8 = 24;

/// Moves the pitch stored in a note block's tile entity onto its state.
pub struct NoteBlockRule;

impl BlockCompatibilityRule for NoteBlockRule {
    fn matches(&self, state: &BlockState) -> bool {
        state.id() == "minecraft:note_block"
    }

    fn apply(
        &self,
        state: &BlockState,
        nbt: &mut NbtCompound,
        _registries: &Registries,
    ) -> Option<BlockState> {
        match nbt.get_byte("note") {
            Some(note) if (0..=MAX_NOTE).contains(&note) => Some(state.with("note", note)),
            _ => Some(state.clone()),
        }
    }
}
