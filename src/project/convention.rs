//! Convention manifest projects
//!
//! Files belong to the project by living next to the manifest, so listings
//! come from the file system and file operations never touch the manifest.
//! The manifest is only read for its references.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use crate::document::{self, Document};
use crate::domain::ports::{FileSystem, ProjectSettings};
use crate::domain::value_objects::{
    FileStat, IgnoreList, PackageReference, ProjectListing, ProjectReference,
};
use crate::error::{ProjsyncError, ProjsyncResult};

use super::file_ops::FileOps;
use super::manifest_index::collect_references;
use super::{manifest_dir, project_name, LoadState, Project, ProjectKind};

/// A project whose files are included by convention.
pub struct ConventionManifestProject<FS: FileSystem> {
    manifest_path: PathBuf,
    manifest_dir: PathBuf,
    name: String,
    ops: FileOps<FS>,
    settings: Arc<dyn ProjectSettings>,
    state: LoadState,
    references: Vec<ProjectReference>,
    packages: Vec<PackageReference>,
}

impl<FS: FileSystem> ConventionManifestProject<FS> {
    pub fn new(path: impl Into<PathBuf>, fs: FS, settings: Arc<dyn ProjectSettings>) -> Self {
        let manifest_path = path.into();
        Self {
            manifest_dir: manifest_dir(&manifest_path),
            name: project_name(&manifest_path),
            manifest_path,
            ops: FileOps::new(fs),
            settings,
            state: LoadState::Unloaded,
            references: Vec::new(),
            packages: Vec::new(),
        }
    }

    pub fn with_document(
        path: impl Into<PathBuf>,
        document: Document,
        fs: FS,
        settings: Arc<dyn ProjectSettings>,
    ) -> Self {
        let mut project = Self::new(path, fs, settings);
        project.set_document(&document);
        project.state = LoadState::Loaded;
        project
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    fn ensure_loaded(&mut self) -> ProjsyncResult<()> {
        if !self.state.needs_load() {
            return Ok(());
        }
        let content = self.ops.fs().read(&self.manifest_path)?;
        let document = document::parse(&content)
            .map_err(|e| ProjsyncError::manifest(&self.manifest_path, e))?;
        self.set_document(&document);
        self.state = LoadState::Loaded;
        log::debug!("loaded {}", self.manifest_path.display());
        Ok(())
    }

    fn set_document(&mut self, document: &Document) {
        let (references, packages) = document.root().map(collect_references).unwrap_or_default();
        self.references = references;
        self.packages = packages;
    }

    fn ignore_list(&self) -> ProjsyncResult<IgnoreList> {
        let ignore = IgnoreList::new(self.settings.ignore_list().as_slice())?;
        log::trace!("{} ignore patterns", ignore.pattern_count());
        Ok(ignore)
    }
}

impl<FS: FileSystem> Project for ConventionManifestProject<FS> {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &Path {
        &self.manifest_path
    }

    fn kind(&self) -> ProjectKind {
        ProjectKind::Convention
    }

    fn project_references(&mut self) -> ProjsyncResult<Vec<ProjectReference>> {
        self.ensure_loaded()?;
        Ok(self.references.clone())
    }

    fn package_references(&mut self) -> ProjsyncResult<Vec<PackageReference>> {
        self.ensure_loaded()?;
        Ok(self.packages.clone())
    }

    fn files_and_folders(
        &mut self,
        virtual_path: Option<&Path>,
    ) -> ProjsyncResult<ProjectListing> {
        let dir = match virtual_path {
            Some(virtual_path) => self.manifest_dir.join(virtual_path),
            None => self.manifest_dir.clone(),
        };
        let ignore = self.ignore_list()?;
        self.ops.list_dir(&dir, &ignore, &self.manifest_path)
    }

    fn folder_list(&mut self) -> ProjsyncResult<Vec<String>> {
        let ignore = self.ignore_list()?;
        let mut folders: Vec<String> = self
            .ops
            .walk_folders(&self.manifest_dir, &ignore)
            .iter()
            .filter_map(|folder| folder.strip_prefix(&self.manifest_dir).ok())
            .map(|folder| folder.to_string_lossy().into_owned())
            .collect();
        folders.sort_by_key(|folder| folder.to_lowercase());

        let mut result = vec![format!(".{MAIN_SEPARATOR}")];
        result.extend(folders);
        Ok(result)
    }

    fn stat_file(&self, file_path: &Path, folder_path: &Path) -> FileStat {
        self.ops.stat(file_path, folder_path)
    }

    fn rename_file(&mut self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf> {
        self.ops.rename(path, new_name)
    }

    fn delete_file(&mut self, path: &Path) -> ProjsyncResult<()> {
        self.ops.delete_file(path)
    }

    fn create_file(
        &mut self,
        folder: &Path,
        name: &str,
        content: Option<&str>,
    ) -> ProjsyncResult<PathBuf> {
        self.ops.create_file(folder, name, content)
    }

    fn rename_folder(&mut self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf> {
        self.ops.rename(path, new_name)
    }

    fn delete_folder(&mut self, path: &Path) -> ProjsyncResult<()> {
        self.ops.delete_folder(path)
    }

    fn create_folder(&mut self, path: &Path) -> ProjsyncResult<PathBuf> {
        self.ops.create_folder(path)
    }

    fn move_file(&mut self, path: &Path, new_folder: &Path) -> ProjsyncResult<PathBuf> {
        self.ops.move_into(path, new_folder)
    }

    fn move_folder(&mut self, path: &Path, new_folder: &Path) -> ProjsyncResult<PathBuf> {
        self.ops.move_into(path, new_folder)
    }

    fn refresh(&mut self) -> ProjsyncResult<()> {
        self.state = self.state.after_refresh();
        self.ensure_loaded()
    }

    fn invalidate(&mut self) {
        self.state = LoadState::Stale;
    }
}
