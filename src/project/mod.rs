//! Projects: a manifest file kept in sync with the files it describes
//!
//! Two dialects implement the [`Project`] trait:
//!
//! - [`ExplicitManifestProject`] - every file is listed in the manifest and
//!   the manifest is authoritative for the project tree.
//! - [`ConventionManifestProject`] - files are included by convention; the
//!   file system is authoritative and the manifest only holds references.
//!
//! Use [`open_project`] to pick the dialect from the manifest content.

mod convention;
mod explicit;
mod file_ops;
mod manifest_edit;
mod manifest_index;

pub use convention::ConventionManifestProject;
pub use explicit::ExplicitManifestProject;
pub use file_ops::FileOps;
pub use manifest_index::DEFAULT_TRACKED_ITEMS;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::document::{self, Document};
use crate::domain::ports::{FileSystem, ProjectSettings};
use crate::domain::value_objects::{
    FileStat, PackageReference, ProjectListing, ProjectReference,
};
use crate::error::{ProjsyncError, ProjsyncResult};

/// Include prefix used by shared-items manifests.
pub const SHARED_ITEMS_PREFIX: &str = "$(MSBuildThisFileDirectory)";

/// Manifest extension of shared-items projects.
pub const SHARED_ITEMS_EXTENSION: &str = "projitems";

/// Which kind of manifest a project was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Legacy manifest listing every file.
    Explicit,
    /// Shared-items manifest: explicit, prefixed includes, no references.
    SharedItems,
    /// Modern manifest with implicit file membership.
    Convention,
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProjectKind::Explicit => "explicit",
            ProjectKind::SharedItems => "shared-items",
            ProjectKind::Convention => "convention",
        };
        f.write_str(name)
    }
}

/// Where a project stands with respect to its manifest on disk.
///
/// ```text
/// Unloaded --load--> Loaded --invalidate--> Stale --load--> Loaded
///                      |                                      ^
///                      +--save--> Saved --refresh (skip)------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
    /// Loaded from content this project just wrote itself.
    Saved,
    /// The manifest may have changed on disk since it was read.
    Stale,
}

impl LoadState {
    pub fn needs_load(self) -> bool {
        matches!(self, LoadState::Unloaded | LoadState::Stale)
    }

    /// State after a refresh request. A refresh right after a save is
    /// answered by the save itself and skipped once.
    pub fn after_refresh(self) -> LoadState {
        match self {
            LoadState::Saved => LoadState::Loaded,
            _ => LoadState::Stale,
        }
    }
}

/// A project backed by one manifest file.
///
/// Loading happens lazily on the first call that needs the manifest. All
/// loading and mutating methods take `&mut self`: one operation at a time.
pub trait Project {
    /// Manifest file stem.
    fn name(&self) -> &str;

    /// Absolute path of the manifest.
    fn full_path(&self) -> &Path;

    fn kind(&self) -> ProjectKind;

    /// Whether the project can carry project and package references.
    fn has_references(&self) -> bool {
        self.kind() != ProjectKind::SharedItems
    }

    fn project_references(&mut self) -> ProjsyncResult<Vec<ProjectReference>>;

    fn package_references(&mut self) -> ProjsyncResult<Vec<PackageReference>>;

    /// Folders and files one level below `virtual_path` (the project root
    /// for `None`).
    fn files_and_folders(&mut self, virtual_path: Option<&Path>)
        -> ProjsyncResult<ProjectListing>;

    /// All folders of the project, relative to the manifest, after `./`.
    fn folder_list(&mut self) -> ProjsyncResult<Vec<String>>;

    /// Whether a file named like `file_path` already exists in `folder_path`.
    fn stat_file(&self, file_path: &Path, folder_path: &Path) -> FileStat;

    fn rename_file(&mut self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf>;

    fn delete_file(&mut self, path: &Path) -> ProjsyncResult<()>;

    fn create_file(
        &mut self,
        folder: &Path,
        name: &str,
        content: Option<&str>,
    ) -> ProjsyncResult<PathBuf>;

    fn rename_folder(&mut self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf>;

    fn delete_folder(&mut self, path: &Path) -> ProjsyncResult<()>;

    fn create_folder(&mut self, path: &Path) -> ProjsyncResult<PathBuf>;

    fn move_file(&mut self, path: &Path, new_folder: &Path) -> ProjsyncResult<PathBuf>;

    fn move_folder(&mut self, path: &Path, new_folder: &Path) -> ProjsyncResult<PathBuf>;

    /// Reload the manifest unless this project has just written it.
    fn refresh(&mut self) -> ProjsyncResult<()>;

    /// Mark the manifest as changed on disk; the next access reloads it.
    fn invalidate(&mut self);
}

/// Open the manifest at `path`, choosing the dialect from its content.
///
/// The manifest is read and parsed once here and handed to the project, so
/// the first listing does not read it again.
pub fn open_project<FS>(
    path: &Path,
    fs: FS,
    settings: Arc<dyn ProjectSettings>,
) -> ProjsyncResult<Box<dyn Project>>
where
    FS: FileSystem + 'static,
{
    let content = fs.read(path)?;
    let document = document::parse(&content).map_err(|e| ProjsyncError::manifest(path, e))?;

    let kind = detect_kind(path, &document);
    log::debug!("opening {} as {} project", path.display(), kind);

    let project: Box<dyn Project> = match kind {
        ProjectKind::Convention => Box::new(ConventionManifestProject::with_document(
            path, document, fs, settings,
        )),
        ProjectKind::Explicit => Box::new(ExplicitManifestProject::with_document(
            path, document, fs, settings,
        )?),
        ProjectKind::SharedItems => Box::new(
            ExplicitManifestProject::new(path, fs, settings)
                .shared_items()
                .loaded_from(document)?,
        ),
    };
    Ok(project)
}

/// Detect the dialect of a parsed manifest.
///
/// A root `Sdk` attribute, an `<Sdk>` child or an `<Import Sdk="..">` marks
/// the convention dialect.
pub fn detect_kind(path: &Path, document: &Document) -> ProjectKind {
    let is_shared = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SHARED_ITEMS_EXTENSION));
    if is_shared {
        return ProjectKind::SharedItems;
    }

    let Some(root) = document.root() else {
        return ProjectKind::Explicit;
    };
    let uses_sdk = root.attribute("Sdk").is_some()
        || root.elements().any(|child| {
            child.name() == "Sdk" || (child.name() == "Import" && child.attribute("Sdk").is_some())
        });

    if uses_sdk {
        ProjectKind::Convention
    } else {
        ProjectKind::Explicit
    }
}

/// Manifest file stem, used as the project name.
pub(crate) fn project_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Folder holding the manifest.
pub(crate) fn manifest_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
