//! Manifest include paths
//!
//! Manifests always spell item paths with backslashes, whatever the host OS.
//! Helpers here convert between that spelling and host paths, and
//! [`IncludePattern`] matches and rewrites includes during file operations.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Separator used inside manifest `Include` attributes.
pub const MANIFEST_SEPARATOR: char = '\\';

/// Spell a host-relative path the way a manifest does.
///
/// ```
/// use std::path::Path;
/// use projsync::domain::value_objects::include_path::to_manifest_path;
///
/// assert_eq!(to_manifest_path(Path::new("Forms/Main.cs")), r"Forms\Main.cs");
/// ```
pub fn to_manifest_path(relative: &Path) -> String {
    let mut out = String::new();
    for component in relative.components() {
        let segment = match component {
            Component::CurDir => continue,
            Component::ParentDir => Cow::Borrowed(".."),
            Component::Normal(name) => name.to_string_lossy(),
            Component::RootDir | Component::Prefix(_) => continue,
        };
        if !out.is_empty() {
            out.push(MANIFEST_SEPARATOR);
        }
        out.push_str(&segment);
    }
    out
}

/// Convert a manifest include to a host-relative path.
///
/// Both separators are accepted; empty and `.` segments are dropped, so a
/// folder include with a trailing separator maps to the folder itself.
pub fn to_host_path(include: &str) -> PathBuf {
    include
        .split(['\\', '/'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Normalize separators to backslashes.
pub fn normalize_separators(include: &str) -> String {
    include.replace('/', "\\")
}

/// The folder part of an include (`""` for items at the manifest root).
pub fn parent_include(include: &str) -> &str {
    let trimmed = include.trim_end_matches(MANIFEST_SEPARATOR);
    match trimmed.rfind(MANIFEST_SEPARATOR) {
        Some(pos) => &trimmed[..pos],
        None => "",
    }
}

/// Join a folder include and a relative include, collapsing `.` and `..`.
pub fn join_include(folder: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let joined = folder.split(['\\', '/']).chain(relative.split(['\\', '/']));
    for segment in joined {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("\\")
}

/// Express `target` relative to the folder `from`; both are manifest-relative.
pub fn relative_include(from: &str, target: &str) -> String {
    let from: Vec<&str> = from.split('\\').filter(|s| !s.is_empty()).collect();
    let target: Vec<&str> = target.split('\\').filter(|s| !s.is_empty()).collect();
    let shared = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = vec![".."; from.len() - shared];
    segments.extend_from_slice(&target[shared..]);
    segments.join("\\")
}

/// Whether an include is a wildcard glob rather than a single path.
pub fn is_wildcard(include: &str) -> bool {
    include.contains(['*', '?'])
}

/// What an [`IncludePattern`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Exactly one file.
    File,
    /// A folder and everything below it.
    Folder,
    /// Only the folder's own placeholder entry.
    Placeholder,
}

/// A manifest-relative path used to find entries in a manifest.
///
/// Patterns never contain the include prefix; callers strip it from includes
/// before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludePattern {
    base: String,
    kind: PatternKind,
}

impl IncludePattern {
    pub fn new(relative: &Path, kind: PatternKind) -> Self {
        Self {
            base: to_manifest_path(relative),
            kind,
        }
    }

    pub fn file(relative: &Path) -> Self {
        Self::new(relative, PatternKind::File)
    }

    pub fn folder(relative: &Path) -> Self {
        Self::new(relative, PatternKind::Folder)
    }

    pub fn placeholder(relative: &Path) -> Self {
        Self::new(relative, PatternKind::Placeholder)
    }

    /// The pattern as written in a new entry (folders end with a separator).
    pub fn include(&self) -> String {
        match self.kind {
            PatternKind::File => self.base.clone(),
            PatternKind::Folder | PatternKind::Placeholder => format!("{}\\", self.base),
        }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Whether this pattern denotes the manifest folder itself.
    pub fn is_root(&self) -> bool {
        self.base.is_empty()
    }

    /// Whether a (separator-normalized, prefix-free) include matches.
    pub fn matches(&self, include: &str) -> bool {
        match self.kind {
            PatternKind::File => include == self.base,
            PatternKind::Placeholder => include.trim_end_matches('\\') == self.base,
            PatternKind::Folder => {
                if self.base.is_empty() {
                    return true;
                }
                include.trim_end_matches('\\') == self.base
                    || include
                        .strip_prefix(self.base.as_str())
                        .is_some_and(|rest| rest.starts_with('\\'))
            }
        }
    }

    /// Rewrite a matching include so it lives under `to` instead of `self`.
    ///
    /// Returns `None` when the include doesn't match.
    pub fn rewrite(&self, include: &str, to: &IncludePattern) -> Option<String> {
        if !self.matches(include) {
            return None;
        }
        let rest = &include[self.base.len().min(include.len())..];
        Some(format!("{}{}", to.base, rest))
    }
}
