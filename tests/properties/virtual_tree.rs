//! Property tests for the virtual tree.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use projsync::domain::services::{build_tree, common_prefix, find_level};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,8}(\\.[a-z]{1,3})?").unwrap()
}

fn relative_file() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..=4).prop_map(|segments| segments.iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Building the tree twice from the same items yields the same tree.
    #[test]
    fn property_build_is_deterministic(
        files in proptest::collection::vec(relative_file(), 0..16)
    ) {
        let dir = Path::new("/work/App");
        prop_assert_eq!(build_tree(dir, &files), build_tree(dir, &files));
    }

    /// PROPERTY: Every item below the manifest folder is reachable through its parent level.
    #[test]
    fn property_items_are_reachable(
        files in proptest::collection::vec(relative_file(), 1..16)
    ) {
        let dir = Path::new("/work/App");
        let tree = build_tree(dir, &files);

        for file in &files {
            let name = file.file_name().unwrap().to_string_lossy();
            let level = find_level(&tree, file.parent().filter(|p| !p.as_os_str().is_empty()));
            let part = level.iter().find(|part| part.name == name);
            prop_assert!(part.is_some(), "{} missing from tree", file.display());
            prop_assert_eq!(&part.unwrap().full_path, &dir.join(file));
        }
    }

    /// PROPERTY: Looking up an arbitrary virtual path never panics.
    #[test]
    fn property_find_level_never_panics(
        files in proptest::collection::vec(relative_file(), 0..8),
        lookup in "(?s).{0,64}"
    ) {
        let tree = build_tree(Path::new("/work/App"), &files);
        let _ = find_level(&tree, Some(Path::new(&lookup)));
    }

    /// PROPERTY: The common prefix is a prefix of both paths.
    #[test]
    fn property_common_prefix_is_shared(
        a in relative_file(),
        b in relative_file()
    ) {
        let (a, b) = (Path::new("/").join(a), Path::new("/").join(b));
        let prefix = common_prefix(&a, &b);
        prop_assert!(a.starts_with(&prefix));
        prop_assert!(b.starts_with(&prefix));
    }
}
