use mc_schem_nbt::{NbtCompound, NbtTag};
use mc_schem_world::EntityType;

use super::EntityCompatibilityRule;

/// Rewrites the facing of paintings and item frames saved before 1.13.
///
/// Old saves store a horizontal direction in `Dir` (oldest), `Direction`
/// or `Facing`; the current format stores a 3D direction byte in `Facing`.
pub struct HangingEntityRule;

impl EntityCompatibilityRule for HangingEntityRule {
    fn matches(&self, entity_type: &EntityType, nbt: &NbtCompound) -> bool {
        entity_type.is_vanilla()
            && (nbt.contains_key("Dir")
                || nbt.contains_key("Direction")
                || nbt.contains_key("Facing"))
    }

    fn apply(&self, _entity_type: &EntityType, mut nbt: NbtCompound) -> NbtCompound {
        let int_of = |key: &str| nbt.get(key).and_then(NbtTag::as_i32_lossy);
        let horizontal = if nbt.contains_key("Dir") {
            int_of("Dir").map(|dir| from_legacy_dir(dir as i8))
        } else if nbt.contains_key("Direction") {
            int_of("Direction")
        } else {
            int_of("Facing")
        };
        let Some(horizontal) = horizontal else {
            return nbt;
        };

        let facing = to_hanging_facing(from_pre13_hanging(horizontal));
        nbt.insert("Facing".into(), NbtTag::Byte(facing));
        nbt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    South,
    West,
    East,
}

/// The oldest `Dir` encoding, remapped to the pre-1.13 horizontal index.
fn from_legacy_dir(dir: i8) -> i32 {
    match dir {
        0 => 2,
        1 => 1,
        2 => 0,
        _ => 3,
    }
}

fn from_pre13_hanging(value: i32) -> Direction {
    match value {
        0 => Direction::South,
        1 => Direction::West,
        3 => Direction::East,
        _ => Direction::North,
    }
}

/// 3D direction index: down 0, up 1, north 2, south 3, west 4, east 5.
fn to_hanging_facing(direction: Direction) -> i8 {
    match direction {
        Direction::North => 2,
        Direction::South => 3,
        Direction::West => 4,
        Direction::East => 5,
    }
}
