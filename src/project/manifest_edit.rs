//! Structural edits of explicit manifests
//!
//! [`ItemEditor`] applies the manifest side of file operations: rewriting,
//! removing, counting and adding item entries. Includes are compared
//! prefix-free with backslash separators; the include prefix is put back on
//! everything written.

use std::collections::BTreeSet;

use crate::document::Element;
use crate::domain::value_objects::include_path::{parent_include, relative_include};
use crate::domain::value_objects::{IncludePattern, PatternKind};

use super::manifest_index::{
    clean_include, dependent_parent, DEPENDENT_UPON, FOLDER_ITEM, INCLUDE, ITEM_GROUP,
};

pub(crate) struct ItemEditor<'a> {
    root: &'a mut Element,
    tracked: &'a BTreeSet<String>,
    prefix: &'a str,
}

impl<'a> ItemEditor<'a> {
    pub fn new(root: &'a mut Element, tracked: &'a BTreeSet<String>, prefix: &'a str) -> Self {
        Self {
            root,
            tracked,
            prefix,
        }
    }

    /// Move every entry matching `from` under `to`, keeping `DependentUpon`
    /// links pointing at the same files. Returns the number of entries whose
    /// include changed.
    pub fn rename(&mut self, from: &IncludePattern, to: &IncludePattern) -> usize {
        let (tracked, prefix) = (self.tracked, self.prefix);
        let mut renamed = 0;

        for group in self.root.elements_mut().filter(|e| e.name() == ITEM_GROUP) {
            for item in group.elements_mut() {
                if !tracked.contains(item.name()) {
                    continue;
                }
                let Some(clean) = clean_include(item, prefix) else {
                    continue;
                };
                let new_clean = from.rewrite(&clean, to);
                let owner = new_clean.as_deref().unwrap_or(&clean);

                if let Some(parent) = dependent_parent(item, &clean) {
                    let new_parent = from.rewrite(&parent, to);
                    let owner_moved = parent_include(owner) != parent_include(&clean);
                    if new_parent.is_some() || owner_moved {
                        let target = new_parent.unwrap_or(parent);
                        let text = relative_include(parent_include(owner), &target);
                        if let Some(link) = item.child_element_mut(DEPENDENT_UPON) {
                            link.set_text(text);
                        }
                    }
                }

                if let Some(new_clean) = new_clean {
                    item.set_attribute(INCLUDE, format!("{prefix}{new_clean}"));
                    renamed += 1;
                }
            }
        }

        renamed
    }

    /// Remove every entry matching `pattern` and unlink files depending on a
    /// removed file. Item groups left empty by the removal are dropped.
    ///
    /// Placeholder patterns only match `Folder` entries.
    pub fn remove(&mut self, pattern: &IncludePattern) -> usize {
        let (tracked, prefix) = (self.tracked, self.prefix);
        let mut removed = 0;

        self.root.retain_elements(|group| {
            if group.name() != ITEM_GROUP {
                return true;
            }
            let removed_here = group.retain_elements(|item| {
                if !tracked.contains(item.name()) {
                    return true;
                }
                let Some(clean) = clean_include(item, prefix) else {
                    return true;
                };
                if matches_item(pattern, item, &clean) {
                    return false;
                }
                if pattern.kind() != PatternKind::Placeholder {
                    unlink_dependent(item, &clean, pattern);
                }
                true
            });
            removed += removed_here;
            removed_here == 0 || group.has_element_children()
        });

        removed
    }

    /// Number of tracked entries matching `pattern`.
    pub fn count(&self, pattern: &IncludePattern) -> usize {
        self.root
            .elements()
            .filter(|group| group.name() == ITEM_GROUP)
            .flat_map(Element::elements)
            .filter(|item| self.tracked.contains(item.name()))
            .filter(|item| {
                clean_include(item, self.prefix).is_some_and(|clean| matches_item(pattern, item, &clean))
            })
            .count()
    }

    /// Add an entry of `item_type` for the prefix-free `include`.
    ///
    /// The entry goes into the last item group holding tracked entries; if
    /// there is none a new item group is created after the last existing one.
    pub fn add(&mut self, item_type: &str, include: &str) {
        let item = Element::new(item_type).with_attribute(INCLUDE, format!("{}{include}", self.prefix));

        let mut last_group = None;
        let mut last_tracked_group = None;
        for (index, node) in self.root.children.iter().enumerate() {
            let Some(group) = node.as_element().filter(|e| e.name() == ITEM_GROUP) else {
                continue;
            };
            last_group = Some(index);
            if group.elements().any(|e| self.tracked.contains(e.name())) {
                last_tracked_group = Some(index);
            }
        }

        if let Some(index) = last_tracked_group {
            let indent = self.root.indentation_of(index);
            if let Some(group) = self.root.children[index].as_element_mut() {
                group.append_element(item, &indent);
            }
            return;
        }

        let anchor = last_group.or_else(|| self.root.children.iter().rposition(|n| n.is_element()));
        let indent = anchor
            .map(|index| self.root.indentation_of(index))
            .unwrap_or_else(|| "  ".to_string());
        let mut group = Element::new(ITEM_GROUP);
        group.append_element(item, &indent);

        match last_group {
            Some(index) => self.root.insert_element_after(index, group),
            None => self.root.append_element(group, ""),
        }
    }
}

fn matches_item(pattern: &IncludePattern, item: &Element, clean: &str) -> bool {
    if pattern.kind() == PatternKind::Placeholder && item.name() != FOLDER_ITEM {
        return false;
    }
    pattern.matches(clean)
}

/// Drop the `DependentUpon` link of `item` if it points into `pattern`.
fn unlink_dependent(item: &mut Element, clean: &str, pattern: &IncludePattern) {
    let points_into = dependent_parent(item, clean).is_some_and(|parent| pattern.matches(&parent));
    if points_into {
        item.retain_elements(|child| child.name() != DEPENDENT_UPON);
        item.collapse_if_empty();
    }
}
