//! Legacy identifier renames for entities and block entities.
//!
//! Old schematics store pre-1.11 CamelCase entity names and pre-1.13
//! snake_case names that were later renamed. Both are mapped to current
//! ids here. Unlisted ids pass through unchanged.

/// Entity ids, legacy name → current path.
static ENTITY_RENAMES: &[(&str, &str)] = &[
    ("AreaEffectCloud", "area_effect_cloud"),
    ("ArmorStand", "armor_stand"),
    ("CaveSpider", "cave_spider"),
    ("DragonFireball", "dragon_fireball"),
    ("EnderCrystal", "end_crystal"),
    ("EnderDragon", "ender_dragon"),
    ("EntityHorse", "horse"),
    ("EyeOfEnderSignal", "eye_of_ender"),
    ("FallingSand", "falling_block"),
    ("FireworksRocketEntity", "firework_rocket"),
    ("ItemFrame", "item_frame"),
    ("LavaSlime", "magma_cube"),
    ("LeashKnot", "leash_knot"),
    ("LightningBolt", "lightning_bolt"),
    ("MinecartChest", "chest_minecart"),
    ("MinecartCommandBlock", "command_block_minecart"),
    ("MinecartFurnace", "furnace_minecart"),
    ("MinecartHopper", "hopper_minecart"),
    ("MinecartRideable", "minecart"),
    ("MinecartSpawner", "spawner_minecart"),
    ("MinecartTNT", "tnt_minecart"),
    ("MushroomCow", "mooshroom"),
    ("Ozelot", "ocelot"),
    ("PigZombie", "zombified_piglin"),
    ("PolarBear", "polar_bear"),
    ("PrimedTnt", "tnt"),
    ("ShulkerBullet", "shulker_bullet"),
    ("SmallFireball", "small_fireball"),
    ("SnowMan", "snow_golem"),
    ("SpectralArrow", "spectral_arrow"),
    ("ThrownEgg", "egg"),
    ("ThrownEnderpearl", "ender_pearl"),
    ("ThrownExpBottle", "experience_bottle"),
    ("ThrownPotion", "potion"),
    ("VillagerGolem", "iron_golem"),
    ("WitherBoss", "wither"),
    ("WitherSkull", "wither_skull"),
    ("XPOrb", "experience_orb"),
    // 1.11 - 1.12 names
    ("commandblock_minecart", "command_block_minecart"),
    ("ender_crystal", "end_crystal"),
    ("evocation_fangs", "evoker_fangs"),
    ("evocation_illager", "evoker"),
    ("eye_of_ender_signal", "eye_of_ender"),
    ("fireworks_rocket", "firework_rocket"),
    ("illusion_illager", "illusioner"),
    ("snowman", "snow_golem"),
    ("villager_golem", "iron_golem"),
    ("vindication_illager", "vindicator"),
    ("xp_bottle", "experience_bottle"),
    ("xp_orb", "experience_orb"),
    ("zombie_pigman", "zombified_piglin"),
];

/// Tile-entity ids, legacy name → current path.
static BLOCK_ENTITY_RENAMES: &[(&str, &str)] = &[
    ("AirPortal", "end_portal"),
    ("Cauldron", "brewing_stand"),
    ("Control", "command_block"),
    ("DLDetector", "daylight_detector"),
    ("EnchantTable", "enchanting_table"),
    ("EndGateway", "end_gateway"),
    ("EnderChest", "ender_chest"),
    ("FlowerPot", "flower_pot"),
    ("MobSpawner", "mob_spawner"),
    ("Music", "note_block"),
    ("RecordPlayer", "jukebox"),
    ("Structure", "structure_block"),
    ("Trap", "dispenser"),
    ("noteblock", "note_block"),
];

fn lookup(table: &'static [(&'static str, &'static str)], id: &str) -> Option<&'static str> {
    table
        .iter()
        .find_map(|&(from, to)| (from == id).then_some(to))
}

/// Current id for a saved entity id. A `minecraft:` prefix is ignored when
/// matching; unknown ids are returned as given.
pub fn convert_entity_id(id: &str) -> String {
    let bare = id.strip_prefix("minecraft:").unwrap_or(id);
    match lookup(ENTITY_RENAMES, bare) {
        Some(renamed) => renamed.to_string(),
        None => id.to_string(),
    }
}

/// Current id for a saved tile-entity id. Unknown ids are returned as given.
pub fn convert_block_entity_id(id: &str) -> String {
    lookup(BLOCK_ENTITY_RENAMES, id).unwrap_or(id).to_string()
}
