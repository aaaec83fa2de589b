use mc_schem_nbt::{NbtCompound, NbtTag};
use mc_schem_world::{BlockState, Registries};

use super::BlockCompatibilityRule;

/// Legacy item ids whose potted form depends on the data value.
static LEGACY_PLANTS: &[(&str, u16)] = &[
    ("minecraft:red_flower", 38),
    ("minecraft:yellow_flower", 37),
    ("minecraft:sapling", 6),
    ("minecraft:deadbush", 31),
    ("minecraft:tallgrass", 31),
];

/// Turns a flower pot with an `Item` payload into the matching
/// `potted_*` block.
pub struct FlowerPotRule;

impl BlockCompatibilityRule for FlowerPotRule {
    fn matches(&self, state: &BlockState) -> bool {
        state.id() == "minecraft:flower_pot"
    }

    fn apply(
        &self,
        state: &BlockState,
        nbt: &mut NbtCompound,
        registries: &Registries,
    ) -> Option<BlockState> {
        let data = nbt.get("Data").and_then(NbtTag::as_int).unwrap_or(0);
        let data = (data & 0x0F) as u8;

        let potted = match nbt.get("Item") {
            Some(NbtTag::String(item)) if item.is_empty() => {
                return Some(
                    registries
                        .block_types
                        .default_state("minecraft:flower_pot")
                        .unwrap_or_else(|| state.clone()),
                );
            }
            Some(NbtTag::String(item)) => planted_name(item, data, registries)
                .and_then(|name| potted_state(&name, registries)),
            Some(NbtTag::Int(id)) => u16::try_from(*id)
                .ok()
                .and_then(|id| legacy_path(id, data, registries))
                .and_then(|name| potted_state(&name, registries)),
            _ => None,
        };

        match potted {
            Some(potted) => {
                nbt.retain(|key, _| key == "id");
                Some(potted)
            }
            None => Some(state.clone()),
        }
    }
}

fn planted_name(item: &str, data: u8, registries: &Registries) -> Option<String> {
    let legacy_id = LEGACY_PLANTS
        .iter()
        .find_map(|&(name, id)| (name == item).then_some(id));
    match legacy_id {
        Some(id) => legacy_path(id, data, registries),
        None => item.strip_prefix("minecraft:").map(str::to_string),
    }
}

fn legacy_path(id: u16, data: u8, registries: &Registries) -> Option<String> {
    registries
        .legacy
        .resolve(id, data)
        .map(|state| state.path().to_string())
}

fn potted_state(plant: &str, registries: &Registries) -> Option<BlockState> {
    registries
        .block_types
        .default_state(&format!("minecraft:potted_{plant}"))
}
