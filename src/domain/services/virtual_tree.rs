//! Virtual tree builder
//!
//! Turns the flat list of item paths found in a manifest into a hierarchy of
//! path segments. Each path is resolved against the manifest folder and then
//! made relative to the longest segment-wise prefix it shares with that
//! folder, so items that live outside the project (`..\Shared\Util.cs`) still
//! get a sensible place in the tree.
//!
//! The tree is a disposable projection: it is rebuilt from the manifest after
//! every load and save and never edited in place.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// One node of the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePart {
    /// Segment name.
    pub name: String,
    /// Path from the tree root to this node.
    pub virtual_path: PathBuf,
    /// Absolute path on disk.
    pub full_path: PathBuf,
    pub children: Vec<TreePart>,
}

/// Build the tree for `files` (manifest-relative host paths).
///
/// Deterministic: the same input always yields the same nodes in the same
/// order (first appearance wins).
pub fn build_tree(manifest_dir: &Path, files: &[PathBuf]) -> Vec<TreePart> {
    let mut tree: Vec<TreePart> = Vec::new();

    for file in files {
        let full_path = resolve_path(manifest_dir, file);
        let root = common_prefix(manifest_dir, &full_path);
        let Ok(relative) = full_path.strip_prefix(&root) else {
            continue;
        };

        let mut level = &mut tree;
        let mut current_full = root.clone();
        let mut current_virtual = PathBuf::new();
        for segment in relative.components().filter_map(normal_segment) {
            current_full.push(segment);
            current_virtual.push(segment);
            let name = segment.to_string_lossy();

            let index = match level.iter().position(|part| part.name == name) {
                Some(index) => index,
                None => {
                    level.push(TreePart {
                        name: name.into_owned(),
                        virtual_path: current_virtual.clone(),
                        full_path: current_full.clone(),
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };
            level = &mut level[index].children;
        }
    }

    tree
}

/// The nodes one level below `virtual_path` (the top level for `None`).
///
/// A segment that doesn't exist yields an empty level.
pub fn find_level<'a>(tree: &'a [TreePart], virtual_path: Option<&Path>) -> &'a [TreePart] {
    let Some(virtual_path) = virtual_path else {
        return tree;
    };

    let mut level = tree;
    for segment in virtual_path.components().filter_map(normal_segment) {
        match level.iter().find(|part| OsStr::new(&part.name) == segment) {
            Some(part) => level = &part.children,
            None => return &[],
        }
    }
    level
}

/// Join `relative` onto `base` and collapse `.` and `..` lexically.
pub fn resolve_path(base: &Path, relative: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in base.join(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Longest common prefix of two paths, compared segment by segment.
///
/// ```
/// use std::path::Path;
/// use projsync::domain::services::common_prefix;
///
/// let prefix = common_prefix(Path::new("/src/foo"), Path::new("/src/foobar/a.cs"));
/// assert_eq!(prefix, Path::new("/src"));
/// ```
pub fn common_prefix(a: &Path, b: &Path) -> PathBuf {
    a.components()
        .zip(b.components())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.as_os_str())
        .collect()
}

fn normal_segment(component: Component<'_>) -> Option<&OsStr> {
    match component {
        Component::Normal(segment) => Some(segment),
        _ => None,
    }
}
