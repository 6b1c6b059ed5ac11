//! ProjectSettings port - user configurable project behavior
//!
//! Projects ask for the tables below on every operation instead of caching
//! them, so a settings source may change between calls.

use std::collections::BTreeMap;

/// Item type assigned when neither the extension nor the `"*"` wildcard maps.
pub const UNTYPED_ITEM: &str = "None";

/// Key in the item type table used when the extension is not listed.
pub const WILDCARD_EXTENSION: &str = "*";

/// Source of item-type and ignore settings.
pub trait ProjectSettings {
    /// Lower-cased extension (without dot) to manifest item type.
    fn item_types(&self) -> BTreeMap<String, String>;

    /// Gitignore-style names and patterns hidden from convention listings.
    fn ignore_list(&self) -> Vec<String>;

    /// Item type for a new file, by extension, falling back to the wildcard
    /// entry and then to [`UNTYPED_ITEM`].
    fn item_type_for(&self, file_name: &str) -> String {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let types = self.item_types();
        types
            .get(&extension)
            .or_else(|| types.get(WILDCARD_EXTENSION))
            .filter(|item_type| !item_type.is_empty())
            .cloned()
            .unwrap_or_else(|| UNTYPED_ITEM.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(BTreeMap<String, String>);

    impl ProjectSettings for Fixed {
        fn item_types(&self) -> BTreeMap<String, String> {
            self.0.clone()
        }

        fn ignore_list(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn settings(pairs: &[(&str, &str)]) -> Fixed {
        Fixed(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        let s = settings(&[("cs", "Compile")]);
        assert_eq!(s.item_type_for("Program.CS"), "Compile");
    }

    #[test]
    fn wildcard_is_the_fallback() {
        let s = settings(&[("cs", "Compile"), ("*", "Content")]);
        assert_eq!(s.item_type_for("logo.png"), "Content");
    }

    #[test]
    fn untyped_when_nothing_maps() {
        let s = settings(&[("cs", "Compile")]);
        assert_eq!(s.item_type_for("README"), "None");
        assert_eq!(s.item_type_for("notes.txt"), "None");
    }
}
