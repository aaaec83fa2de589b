use mc_schem_nbt::{CompoundExt, NbtCompound};
use mc_schem_world::{BlockState, Registries};

use super::BlockCompatibilityRule;

/// Floor and wall block ids for each legacy `SkullType`.
static SKULL_TYPES: [(&str, &str); 6] = [
    ("skeleton_skull", "skeleton_wall_skull"),
    ("wither_skeleton_skull", "wither_skeleton_wall_skull"),
    ("zombie_head", "zombie_wall_head"),
    ("player_head", "player_wall_head"),
    ("creeper_head", "creeper_wall_head"),
    ("dragon_head", "dragon_wall_head"),
];

/// Resolves the head variant from the pre-1.13 `SkullType`/`Rot` tags.
/// Legacy data only encodes skeleton skulls.
pub struct SkullRule;

impl BlockCompatibilityRule for SkullRule {
    fn matches(&self, state: &BlockState) -> bool {
        matches!(
            state.id(),
            "minecraft:skeleton_skull" | "minecraft:skeleton_wall_skull"
        )
    }

    fn apply(
        &self,
        state: &BlockState,
        nbt: &mut NbtCompound,
        registries: &Registries,
    ) -> Option<BlockState> {
        let is_wall = state.id() == "minecraft:skeleton_wall_skull";
        let variant = nbt
            .get_byte("SkullType")
            .and_then(|t| usize::try_from(t).ok())
            .and_then(|t| SKULL_TYPES.get(t));
        let Some(&(floor, wall)) = variant else {
            return Some(state.clone());
        };
        let Some(mut next) = registries
            .block_types
            .default_state(if is_wall { wall } else { floor })
        else {
            return Some(state.clone());
        };

        let rot = nbt.get_byte("Rot");
        nbt.remove("SkullType");
        nbt.remove("Rot");

        if is_wall {
            if let Some(facing) = state.property("facing") {
                next = next.with("facing", facing);
            }
        } else {
            let rotation = match rot {
                Some(rot) => (rot & 0x0F).to_string(),
                None => state.property("rotation").unwrap_or("0").to_string(),
            };
            next = next.with("rotation", rotation);
        }
        Some(next)
    }
}
