// SPDX-License-Identifier: GPL-3.0-only

//! Built-in skins embedded in the binary.

use rust_embed::RustEmbed;

use crate::layout::parser::parse_skin_from_string;
use crate::layout::types::{ParseError, ParseResult, Skin};

#[derive(RustEmbed)]
#[folder = "resources/skins/"]
struct SkinAssets;

/// Returns the names of all built-in skins, sorted.
pub fn builtin_skin_names() -> Vec<String> {
    let mut names: Vec<String> = SkinAssets::iter()
        .filter_map(|file| file.strip_suffix(".json").map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Loads a built-in skin by name (e.g. `"ultimate"`).
pub fn builtin_skin(name: &str) -> Result<ParseResult<Skin>, ParseError> {
    let file_name = format!("{}.json", name);
    let Some(file) = SkinAssets::get(&file_name) else {
        return Err(ParseError::UnknownSkin {
            name: name.to_string(),
            available: builtin_skin_names(),
        });
    };

    let json = String::from_utf8_lossy(&file.data);
    parse_skin_from_string(&json).map_err(|e| e.with_path(&file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PopupAlignment, ShiftMode};
    use crate::input::{ControlKey, KeyKind};
    use crate::layout::types::LayoutMode;

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            builtin_skin_names(),
            vec!["gustav", "naomi", "plain", "sofus", "ultimate"]
        );
    }

    #[test]
    fn test_all_builtin_skins_load_without_warnings() {
        for name in builtin_skin_names() {
            let result = builtin_skin(&name)
                .unwrap_or_else(|e| panic!("Built-in skin '{}' failed to load: {}", name, e));
            assert!(
                !result.has_warnings(),
                "Built-in skin '{}' has warnings: {:?}",
                name,
                result.warnings
            );
        }
    }

    #[test]
    fn test_unknown_builtin() {
        match builtin_skin("dvorak") {
            Err(ParseError::UnknownSkin { name, available }) => {
                assert_eq!(name, "dvorak");
                assert!(available.contains(&"ultimate".to_string()));
            }
            other => panic!("Expected UnknownSkin, got {:?}", other),
        }
    }

    #[test]
    fn test_ultimate_contents() {
        let skin = builtin_skin("ultimate").unwrap().into_value();

        assert_eq!(skin.layout.keys(LayoutMode::Extra)[2], vec![
            "for", "while", "range", "return"
        ]);
        assert_eq!(
            skin.accents.options("r"),
            Some(&["range".to_string(), "return".to_string()][..])
        );
        assert_eq!(skin.accents.options("=").map(<[String]>::len), Some(6));
        assert_eq!(skin.behavior.shift_mode, ShiftMode::OneShot);
        assert_eq!(skin.display_label("{extra}"), "123");
    }

    #[test]
    fn test_skin_variants_are_configuration() {
        let sofus = builtin_skin("sofus").unwrap().into_value();
        assert_eq!(sofus.classify("{ghost}"), KeyKind::Control(ControlKey::Enter));
        assert_eq!(sofus.classify("{123}"), KeyKind::Control(ControlKey::Symbols));
        assert_eq!(sofus.behavior.double_tap_window_ms, 0);

        let naomi = builtin_skin("naomi").unwrap().into_value();
        assert_eq!(naomi.behavior.shift_mode, ShiftMode::Toggle);
        assert_eq!(naomi.behavior.popup_alignment, PopupAlignment::Adaptive);

        let plain = builtin_skin("plain").unwrap().into_value();
        assert_eq!(plain.behavior.shift_mode, ShiftMode::Disabled);
    }

    #[test]
    fn test_sofus_dictionary_has_no_nonlocal() {
        let sofus = builtin_skin("sofus").unwrap().into_value();
        assert_eq!(sofus.keywords.len(), 34);
        assert!(!sofus.keywords.iter().any(|k| k == "nonlocal"));

        let ultimate = builtin_skin("ultimate").unwrap().into_value();
        assert!(ultimate.keywords.iter().any(|k| k == "nonlocal"));
    }
}
