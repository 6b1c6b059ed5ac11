//! Files and folders as reported by a project listing

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file in a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFile {
    pub name: String,
    pub full_path: PathBuf,
    pub has_dependents: bool,
    /// Files attached to this one through `DependentUpon`.
    pub dependents: Vec<ProjectFile>,
}

impl ProjectFile {
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        let full_path = full_path.into();
        Self {
            name: display_name(&full_path),
            full_path,
            has_dependents: false,
            dependents: Vec::new(),
        }
    }

    /// Attach a dependent file and flag this file as having dependents.
    pub fn add_dependent(&mut self, dependent: ProjectFile) {
        self.has_dependents = true;
        self.dependents.push(dependent);
    }
}

/// A folder in a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFolder {
    pub name: String,
    pub full_path: PathBuf,
}

impl ProjectFolder {
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        let full_path = full_path.into();
        Self {
            name: display_name(&full_path),
            full_path,
        }
    }
}

/// One level of a project: folders and files, each sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectListing {
    pub folders: Vec<ProjectFolder>,
    pub files: Vec<ProjectFile>,
}

impl ProjectListing {
    /// Sort folders and files case-insensitively by display name.
    pub fn sort(&mut self) {
        self.folders.sort_by_key(|folder| folder.name.to_lowercase());
        self.files.sort_by_key(|file| file.name.to_lowercase());
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// Result of checking whether a file name is free in a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStat {
    pub exists: bool,
    pub filename: String,
    pub full_path: PathBuf,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
