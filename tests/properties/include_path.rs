//! Property tests for manifest include paths.

use std::path::PathBuf;

use proptest::prelude::*;

use projsync::domain::value_objects::include_path::{
    join_include, relative_include, to_host_path, to_manifest_path,
};
use projsync::domain::value_objects::IncludePattern;

fn segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[A-Za-z0-9_-]{1,8}(\\.[a-z]{1,3})?").unwrap();
    proptest::collection::vec(segment, 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Host paths survive the trip through manifest spelling.
    #[test]
    fn property_manifest_spelling_round_trips(parts in segments()) {
        let path: PathBuf = parts.iter().collect();
        let include = to_manifest_path(&path);

        prop_assert!(!include.contains('/'));
        prop_assert_eq!(to_host_path(&include), path);
    }

    /// PROPERTY: A relative include joined back onto its folder gives the target.
    #[test]
    fn property_relative_include_joins_back(from in segments(), target in segments()) {
        let (from, target) = (from.join("\\"), target.join("\\"));
        let relative = relative_include(&from, &target);
        prop_assert_eq!(join_include(&from, &relative), target);
    }

    /// PROPERTY: Rewriting a folder moves every include below it and nothing else.
    #[test]
    fn property_folder_rewrite_keeps_tail(
        folder in segments(),
        tail in segments(),
        destination in segments()
    ) {
        let from = IncludePattern::folder(&folder.iter().collect::<PathBuf>());
        let to = IncludePattern::folder(&destination.iter().collect::<PathBuf>());
        let include = format!("{}\\{}", folder.join("\\"), tail.join("\\"));

        let rewritten = from.rewrite(&include, &to).unwrap();
        prop_assert_eq!(rewritten, format!("{}\\{}", destination.join("\\"), tail.join("\\")));

        let sibling = format!("{}x\\{}", folder.join("\\"), tail.join("\\"));
        prop_assert!(from.rewrite(&sibling, &to).is_none());
    }

    /// PROPERTY: A placeholder pattern matches its folder entry with or without a trailing separator.
    #[test]
    fn property_placeholder_matches_folder_entry(folder in segments()) {
        let pattern = IncludePattern::placeholder(&folder.iter().collect::<PathBuf>());
        let include = folder.join("\\");

        prop_assert!(pattern.matches(&include));
        let with_separator = format!("{include}\\");
        let with_child = format!("{include}\\Item.cs");
        prop_assert!(pattern.matches(&with_separator));
        prop_assert!(!pattern.matches(&with_child));
    }
}
