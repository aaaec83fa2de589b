use mc_schem_nbt::{NbtCompound, NbtTag};
use mc_schem_world::{BlockState, Registries};
use serde_json::{json, Value};

use super::BlockCompatibilityRule;

const TEXT_KEYS: [&str; 4] = ["Text1", "Text2", "Text3", "Text4"];

/// Converts plain sign lines to JSON text components.
pub struct SignTextRule;

impl BlockCompatibilityRule for SignTextRule {
    fn matches(&self, state: &BlockState) -> bool {
        state.path().ends_with("sign")
    }

    fn apply(
        &self,
        state: &BlockState,
        nbt: &mut NbtCompound,
        _registries: &Registries,
    ) -> Option<BlockState> {
        for key in TEXT_KEYS {
            let Some(NbtTag::String(line)) = nbt.get(key) else {
                continue;
            };
            if let Some(component) = to_text_component(line) {
                nbt.insert(key.to_string(), NbtTag::String(component));
            }
        }
        Some(state.clone())
    }
}

/// `None` when the line is already a JSON object.
fn to_text_component(line: &str) -> Option<String> {
    let parsed = if line.starts_with('{') {
        serde_json::from_str::<Value>(line).ok()
    } else {
        None
    };
    let text = match parsed {
        Some(Value::Object(_)) => return None,
        Some(Value::Null) => Value::String(String::new()),
        Some(other) => other,
        None => Value::String(line.to_string()),
    };
    Some(json!({ "text": text }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_nbt(lines: [&str; 4]) -> NbtCompound {
        let mut nbt = NbtCompound::new();
        nbt.insert("id".into(), NbtTag::String("Sign".into()));
        for (key, line) in TEXT_KEYS.iter().zip(lines) {
            nbt.insert(key.to_string(), NbtTag::String(line.into()));
        }
        nbt
    }

    #[test]
    fn matches_signs_only() {
        assert!(SignTextRule.matches(&BlockState::new("oak_sign")));
        assert!(SignTextRule.matches(&BlockState::new("oak_wall_sign")));
        assert!(!SignTextRule.matches(&BlockState::new("oak_planks")));
    }

    #[test]
    fn plain_lines_are_wrapped() {
        let regs = Registries::bundled().unwrap();
        let state: BlockState = "oak_sign[rotation=4]".parse().unwrap();
        let mut nbt = sign_nbt(["Hello", "", "say \"hi\"", r#"{"text":"kept"}"#]);

        let out = SignTextRule.apply(&state, &mut nbt, &regs);
        assert_eq!(out, Some(state));
        assert_eq!(nbt["Text1"], NbtTag::String(r#"{"text":"Hello"}"#.into()));
        assert_eq!(nbt["Text2"], NbtTag::String(r#"{"text":""}"#.into()));
        assert_eq!(
            nbt["Text3"],
            NbtTag::String(r#"{"text":"say \"hi\""}"#.into())
        );
        assert_eq!(nbt["Text4"], NbtTag::String(r#"{"text":"kept"}"#.into()));
    }

    #[test]
    fn broken_json_is_treated_as_text() {
        assert_eq!(
            to_text_component("{oops").as_deref(),
            Some(r#"{"text":"{oops"}"#)
        );
    }

    #[test]
    fn missing_and_non_string_lines_untouched() {
        let regs = Registries::bundled().unwrap();
        let mut nbt = NbtCompound::new();
        nbt.insert("Text1".into(), NbtTag::Int(3));
        SignTextRule.apply(&BlockState::new("oak_sign"), &mut nbt, &regs);
        assert_eq!(nbt["Text1"], NbtTag::Int(3));
        assert!(!nbt.contains_key("Text2"));
    }
}
