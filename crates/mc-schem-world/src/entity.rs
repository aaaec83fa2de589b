//! Entity types and entity snapshots.

use std::collections::HashSet;
use std::fmt;

use mc_schem_nbt::NbtCompound;

use crate::block::namespaced;

/// A known, namespaced entity type id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityType(String);

impl EntityType {
    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn is_vanilla(&self) -> bool {
        self.0.starts_with("minecraft:")
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity type plus its saved NBT.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEntity {
    pub entity_type: EntityType,
    pub nbt: NbtCompound,
}

impl BaseEntity {
    pub fn new(entity_type: EntityType, nbt: NbtCompound) -> Self {
        Self { entity_type, nbt }
    }
}

/// Registry of entity types that can be placed into a clipboard.
#[derive(Debug, Clone)]
pub struct EntityTypeRegistry {
    types: HashSet<String>,
}

impl Default for EntityTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTypeRegistry {
    /// Build the registry with all vanilla entity types.
    pub fn new() -> Self {
        Self::from_ids(VANILLA_ENTITY_TYPES.iter().copied())
    }

    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            types: ids.into_iter().map(|id| namespaced(&id.to_lowercase())).collect(),
        }
    }

    /// Look up a type id. Ids are case-insensitive and default to the
    /// `minecraft` namespace.
    pub fn get(&self, id: &str) -> Option<EntityType> {
        let id = namespaced(&id.to_lowercase());
        self.types.contains(&id).then_some(EntityType(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Entity types that can exist in a saved structure. Players and fishing
/// bobbers are never persisted, so they are absent.
static VANILLA_ENTITY_TYPES: &[&str] = &[
    "area_effect_cloud",
    "armor_stand",
    "arrow",
    "bat",
    "bee",
    "blaze",
    "boat",
    "cat",
    "cave_spider",
    "chest_minecart",
    "chicken",
    "cod",
    "command_block_minecart",
    "cow",
    "creeper",
    "dolphin",
    "donkey",
    "dragon_fireball",
    "drowned",
    "egg",
    "elder_guardian",
    "end_crystal",
    "ender_dragon",
    "ender_pearl",
    "enderman",
    "endermite",
    "evoker",
    "evoker_fangs",
    "experience_bottle",
    "experience_orb",
    "eye_of_ender",
    "falling_block",
    "fireball",
    "firework_rocket",
    "fox",
    "furnace_minecart",
    "ghast",
    "giant",
    "guardian",
    "hoglin",
    "hopper_minecart",
    "horse",
    "husk",
    "illusioner",
    "iron_golem",
    "item",
    "item_frame",
    "leash_knot",
    "lightning_bolt",
    "llama",
    "llama_spit",
    "magma_cube",
    "minecart",
    "mooshroom",
    "mule",
    "ocelot",
    "painting",
    "panda",
    "parrot",
    "phantom",
    "pig",
    "piglin",
    "piglin_brute",
    "pillager",
    "polar_bear",
    "potion",
    "pufferfish",
    "rabbit",
    "ravager",
    "salmon",
    "sheep",
    "shulker",
    "shulker_bullet",
    "silverfish",
    "skeleton",
    "skeleton_horse",
    "slime",
    "small_fireball",
    "snow_golem",
    "snowball",
    "spawner_minecart",
    "spectral_arrow",
    "spider",
    "squid",
    "stray",
    "strider",
    "tnt",
    "tnt_minecart",
    "trader_llama",
    "trident",
    "tropical_fish",
    "turtle",
    "vex",
    "villager",
    "vindicator",
    "wandering_trader",
    "witch",
    "wither",
    "wither_skeleton",
    "wither_skull",
    "wolf",
    "zoglin",
    "zombie",
    "zombie_horse",
    "zombie_villager",
    "zombified_piglin",
];
