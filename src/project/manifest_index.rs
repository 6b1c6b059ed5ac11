//! Derived views of a parsed manifest
//!
//! Everything here is recomputed from the document after each load and save;
//! nothing is edited in place.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::document::{Document, Element};
use crate::domain::ports::ProjectSettings;
use crate::domain::services::{build_tree, TreePart};
use crate::domain::value_objects::include_path::{
    is_wildcard, join_include, normalize_separators, parent_include, to_host_path,
};
use crate::domain::value_objects::{PackageReference, ProjectReference};

pub(crate) const ITEM_GROUP: &str = "ItemGroup";
pub(crate) const FOLDER_ITEM: &str = "Folder";
pub(crate) const DEPENDENT_UPON: &str = "DependentUpon";
pub(crate) const INCLUDE: &str = "Include";

/// Item types that describe files or folders of the project tree.
pub const DEFAULT_TRACKED_ITEMS: &[&str] = &[
    "Compile",
    "ClCompile",
    "ClInclude",
    "Content",
    "TypeScriptCompile",
    "CustomBuild",
    "EmbeddedResource",
    "None",
    FOLDER_ITEM,
];

/// Built-in item types plus every type the settings may assign.
pub(crate) fn tracked_items(settings: &dyn ProjectSettings) -> BTreeSet<String> {
    DEFAULT_TRACKED_ITEMS
        .iter()
        .map(|name| name.to_string())
        .chain(settings.item_types().into_values())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Tree, dependents and references of one manifest.
#[derive(Debug, Default)]
pub(crate) struct ManifestIndex {
    pub tree: Vec<TreePart>,
    /// Project-relative host path of a file to the files depending on it.
    pub dependents: HashMap<PathBuf, Vec<PathBuf>>,
    pub references: Vec<ProjectReference>,
    pub packages: Vec<PackageReference>,
}

/// The include of a tracked item with the prefix stripped and separators
/// normalized, or `None` for items without a usable include.
pub(crate) fn clean_include(item: &Element, prefix: &str) -> Option<String> {
    let include = item.attribute(INCLUDE)?.trim();
    let include = include.strip_prefix(prefix).unwrap_or(include);
    if include.is_empty() {
        return None;
    }
    Some(normalize_separators(include))
}

/// The include of the file an item depends on, relative to the manifest.
pub(crate) fn dependent_parent(item: &Element, clean: &str) -> Option<String> {
    let text = item.child_element(DEPENDENT_UPON)?.text();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(join_include(parent_include(clean), text))
}

pub(crate) fn item_groups(root: &Element) -> impl Iterator<Item = &Element> {
    root.elements().filter(|element| element.name() == ITEM_GROUP)
}

pub(crate) fn index_document(
    document: &Document,
    manifest_dir: &Path,
    tracked: &BTreeSet<String>,
    prefix: &str,
) -> ManifestIndex {
    let Some(root) = document.root() else {
        return ManifestIndex::default();
    };

    let (references, packages) = collect_references(root);
    let mut files: Vec<PathBuf> = Vec::new();
    let mut dependents: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();

    for item in item_groups(root).flat_map(Element::elements) {
        if !tracked.contains(item.name()) {
            continue;
        }
        let Some(clean) = clean_include(item, prefix) else {
            continue;
        };
        if is_wildcard(&clean) {
            continue;
        }

        match dependent_parent(item, &clean) {
            Some(parent) => dependents
                .entry(to_host_path(&parent))
                .or_default()
                .push(to_host_path(&clean)),
            None => files.push(to_host_path(&clean)),
        }
    }

    ManifestIndex {
        tree: build_tree(manifest_dir, &files),
        dependents,
        references,
        packages,
    }
}

/// Project, assembly and package references of a manifest root.
pub(crate) fn collect_references(root: &Element) -> (Vec<ProjectReference>, Vec<PackageReference>) {
    let mut references = Vec::new();
    let mut packages = Vec::new();

    for item in item_groups(root).flat_map(Element::elements) {
        let Some(include) = item.attribute(INCLUDE).filter(|i| !i.trim().is_empty()) else {
            continue;
        };
        match item.name() {
            "ProjectReference" => references.push(ProjectReference::from_project_include(include)),
            "Reference" => references.push(ProjectReference::from_assembly_include(include)),
            "PackageReference" => {
                let version = item
                    .attribute("Version")
                    .map(str::to_string)
                    .or_else(|| item.child_element("Version").map(|v| v.text().trim().to_string()))
                    .filter(|version| !version.is_empty());
                packages.push(PackageReference::new(include.trim(), version));
            }
            _ => {}
        }
    }

    (references, packages)
}
