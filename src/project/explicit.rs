//! Explicit manifest projects
//!
//! Every file of the project is listed in the manifest, which is the source of
//! truth for the project tree. File operations patch the manifest and the
//! disk together; see the individual methods for the order of the two.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use crate::document::{self, Document};
use crate::domain::ports::{FileSystem, ProjectSettings};
use crate::domain::services::{
    find_level, parse_packages_config, resolve_path, TreePart, PACKAGES_CONFIG,
};
use crate::domain::value_objects::{
    FileStat, IncludePattern, PackageReference, ProjectFile, ProjectFolder, ProjectListing,
    ProjectReference,
};
use crate::error::{ProjsyncError, ProjsyncResult};

use super::file_ops::FileOps;
use super::manifest_edit::ItemEditor;
use super::manifest_index::{index_document, tracked_items, ManifestIndex, FOLDER_ITEM};
use super::{manifest_dir, project_name, LoadState, Project, ProjectKind, SHARED_ITEMS_PREFIX};


/// A project whose manifest lists every file.
pub struct ExplicitManifestProject<FS: FileSystem> {
    manifest_path: PathBuf,
    manifest_dir: PathBuf,
    name: String,
    kind: ProjectKind,
    include_prefix: String,
    ops: FileOps<FS>,
    settings: Arc<dyn ProjectSettings>,
    state: LoadState,
    document: Option<Document>,
    index: ManifestIndex,
    /// Packages from `packages.config`, read on full loads only.
    sidecar_packages: Vec<PackageReference>,
}

impl<FS: FileSystem> ExplicitManifestProject<FS> {
    /// A project that reads its manifest on first use.
    pub fn new(path: impl Into<PathBuf>, fs: FS, settings: Arc<dyn ProjectSettings>) -> Self {
        let manifest_path = path.into();
        Self {
            manifest_dir: manifest_dir(&manifest_path),
            name: project_name(&manifest_path),
            manifest_path,
            kind: ProjectKind::Explicit,
            include_prefix: String::new(),
            ops: FileOps::new(fs),
            settings,
            state: LoadState::Unloaded,
            document: None,
            index: ManifestIndex::default(),
            sidecar_packages: Vec::new(),
        }
    }

    /// A project over an already parsed manifest.
    pub fn with_document(
        path: impl Into<PathBuf>,
        document: Document,
        fs: FS,
        settings: Arc<dyn ProjectSettings>,
    ) -> ProjsyncResult<Self> {
        Self::new(path, fs, settings).loaded_from(document)
    }

    /// Start from an already parsed manifest instead of reading it on first
    /// use. Call after [`shared_items`](Self::shared_items), so the sidecar
    /// is read for the right kind.
    pub fn loaded_from(mut self, document: Document) -> ProjsyncResult<Self> {
        self.sidecar_packages = self.read_sidecar()?;
        self.set_document(document);
        self.state = LoadState::Loaded;
        Ok(self)
    }

    /// Treat the manifest as a shared-items manifest: includes carry
    /// `$(MSBuildThisFileDirectory)` and there are no references.
    pub fn shared_items(mut self) -> Self {
        self.kind = ProjectKind::SharedItems;
        self.include_prefix = SHARED_ITEMS_PREFIX.to_string();
        self.sidecar_packages.clear();
        if let Some(document) = self.document.take() {
            self.set_document(document);
        }
        self
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
        self.sidecar_packages = self.read_sidecar()?;
        self.set_document(document);
        self.state = LoadState::Loaded;
        log::debug!("loaded {}", self.manifest_path.display());
        Ok(())
    }

    fn read_sidecar(&self) -> ProjsyncResult<Vec<PackageReference>> {
        if self.kind == ProjectKind::SharedItems {
            return Ok(Vec::new());
        }
        let path = self.manifest_dir.join(PACKAGES_CONFIG);
        if !self.ops.fs().exists(&path) {
            return Ok(Vec::new());
        }
        let content = self.ops.fs().read(&path)?;
        parse_packages_config(&content).map_err(|e| ProjsyncError::manifest(path, e))
    }

    fn set_document(&mut self, document: Document) {
        let tracked = tracked_items(self.settings.as_ref());
        self.index = index_document(
            &document,
            &self.manifest_dir,
            &tracked,
            &self.include_prefix,
        );
        self.document = Some(document);
    }

    /// Serialize, write and re-parse the manifest.
    fn save(&mut self) -> ProjsyncResult<()> {
        let Some(document) = &self.document else {
            return Ok(());
        };
        let content = document::serialize(document);
        self.ops.fs().write(&self.manifest_path, &content)?;

        let reparsed = document::parse(&content)
            .map_err(|e| ProjsyncError::manifest(&self.manifest_path, e))?;
        self.set_document(reparsed);
        self.state = LoadState::Saved;
        log::debug!("saved {}", self.manifest_path.display());
        Ok(())
    }

    /// Run a mutation on a loaded project. A failed mutation leaves the
    /// in-memory document ahead of the disk, so the project goes stale.
    fn mutate<T>(
        &mut self,
        operation: impl FnOnce(&mut Self) -> ProjsyncResult<T>,
    ) -> ProjsyncResult<T> {
        self.ensure_loaded()?;
        let result = operation(self);
        if let Err(e) = &result {
            log::warn!("{} may be out of sync: {}", self.manifest_path.display(), e);
            self.state = LoadState::Stale;
        }
        result
    }

    /// Apply `edit` to the manifest root. Manifests without a root element
    /// are left alone.
    fn edit<R>(&mut self, edit: impl FnOnce(&mut ItemEditor<'_>) -> R) -> Option<R> {
        let tracked = tracked_items(self.settings.as_ref());
        let root = self.document.as_mut()?.root_mut()?;
        let mut editor = ItemEditor::new(root, &tracked, &self.include_prefix);
        Some(edit(&mut editor))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        pathdiff::diff_paths(path, &self.manifest_dir).unwrap_or_else(|| path.to_path_buf())
    }

    fn project_file(&self, full_path: &Path) -> ProjectFile {
        let mut file = ProjectFile::new(full_path);
        if let Some(dependents) = self.index.dependents.get(&self.relative(full_path)) {
            for dependent in dependents {
                file.add_dependent(ProjectFile::new(resolve_path(&self.manifest_dir, dependent)));
            }
        }
        file
    }

    fn collect_folders(&self, level: &[TreePart], found: &mut Vec<PathBuf>) {
        for part in level {
            if matches!(self.ops.fs().is_dir(&part.full_path), Ok(true)) {
                found.push(self.relative(&part.full_path));
                self.collect_folders(&part.children, found);
            }
        }
    }

    /// Rewrite entries from `from` to `to`, then keep the old folder visible
    /// and drop the placeholder of the new one.
    fn relocate(&mut self, from: &Path, to: &Path, is_folder: bool) {
        let (from_pattern, to_pattern) = if is_folder {
            (IncludePattern::folder(from), IncludePattern::folder(to))
        } else {
            (IncludePattern::file(from), IncludePattern::file(to))
        };
        let old_parent = parent_of(from);
        let new_parent = parent_of(to);

        self.edit(|editor| {
            editor.rename(&from_pattern, &to_pattern);
            if old_parent != new_parent {
                drop_placeholder(editor, &new_parent);
                keep_folder_visible(editor, &old_parent);
            }
        });
    }
}

impl<FS: FileSystem> Project for ExplicitManifestProject<FS> {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &Path {
        &self.manifest_path
    }

    fn kind(&self) -> ProjectKind {
        self.kind
    }

    fn project_references(&mut self) -> ProjsyncResult<Vec<ProjectReference>> {
        if !self.has_references() {
            return Ok(Vec::new());
        }
        self.ensure_loaded()?;
        Ok(self.index.references.clone())
    }

    /// Manifest package references, or `packages.config` when the manifest
    /// has none.
    fn package_references(&mut self) -> ProjsyncResult<Vec<PackageReference>> {
        if !self.has_references() {
            return Ok(Vec::new());
        }
        self.ensure_loaded()?;
        if self.index.packages.is_empty() {
            return Ok(self.sidecar_packages.clone());
        }
        Ok(self.index.packages.clone())
    }

    fn files_and_folders(
        &mut self,
        virtual_path: Option<&Path>,
    ) -> ProjsyncResult<ProjectListing> {
        self.ensure_loaded()?;

        let mut listing = ProjectListing::default();
        for part in find_level(&self.index.tree, virtual_path) {
            match self.ops.fs().is_dir(&part.full_path) {
                Ok(true) => listing.folders.push(ProjectFolder::new(part.full_path.clone())),
                Ok(false) => listing.files.push(self.project_file(&part.full_path)),
                Err(e) => log::warn!("skipping {}: {}", part.full_path.display(), e),
            }
        }
        listing.sort();
        Ok(listing)
    }

    fn folder_list(&mut self) -> ProjsyncResult<Vec<String>> {
        self.ensure_loaded()?;

        let mut folders = Vec::new();
        self.collect_folders(&self.index.tree, &mut folders);
        let mut folders: Vec<String> = folders
            .iter()
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

    /// Manifest first, then the disk, then save.
    fn rename_file(&mut self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf> {
        self.mutate(|project| {
            let target = project.ops.renamed_path(path, new_name)?;
            let (from, to) = (project.relative(path), project.relative(&target));
            project.relocate(&from, &to, false);
            project.ops.rename(path, new_name)?;
            project.save()?;
            Ok(target)
        })
    }

    fn delete_file(&mut self, path: &Path) -> ProjsyncResult<()> {
        self.mutate(|project| {
            let relative = project.relative(path);
            let parent = parent_of(&relative);
            project.edit(|editor| {
                editor.remove(&IncludePattern::file(&relative));
                keep_folder_visible(editor, &parent);
            });
            project.ops.delete_file(path)?;
            project.save()
        })
    }

    /// The manifest is saved before the file is written.
    fn create_file(
        &mut self,
        folder: &Path,
        name: &str,
        content: Option<&str>,
    ) -> ProjsyncResult<PathBuf> {
        self.mutate(|project| {
            let target = project.ops.vacant_path(folder, name)?;
            let item_type = project.settings.item_type_for(name);
            let folder_relative = project.relative(folder);
            let include = IncludePattern::file(&project.relative(&target)).include();

            project.edit(|editor| {
                drop_placeholder(editor, &folder_relative);
                editor.add(&item_type, &include);
            });
            project.save()?;
            project.ops.create_file(folder, name, content)
        })
    }

    fn rename_folder(&mut self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf> {
        self.mutate(|project| {
            let target = project.ops.renamed_path(path, new_name)?;
            let (from, to) = (project.relative(path), project.relative(&target));
            project.relocate(&from, &to, true);
            project.ops.rename(path, new_name)?;
            project.save()?;
            Ok(target)
        })
    }

    /// Placeholders are only added for the immediate parent.
    fn delete_folder(&mut self, path: &Path) -> ProjsyncResult<()> {
        self.mutate(|project| {
            let relative = project.relative(path);
            let parent = parent_of(&relative);
            project.edit(|editor| {
                editor.remove(&IncludePattern::folder(&relative));
                keep_folder_visible(editor, &parent);
            });
            project.ops.delete_folder(path)?;
            project.save()
        })
    }

    fn create_folder(&mut self, path: &Path) -> ProjsyncResult<PathBuf> {
        self.mutate(|project| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            project
                .ops
                .vacant_path(path.parent().unwrap_or(Path::new("")), &name)?;

            let relative = project.relative(path);
            let parent = parent_of(&relative);
            project.edit(|editor| {
                drop_placeholder(editor, &parent);
                editor.add(FOLDER_ITEM, &IncludePattern::placeholder(&relative).include());
            });
            let created = project.ops.create_folder(path)?;
            project.save()?;
            Ok(created)
        })
    }

    /// The disk first: the destination is only known after the move.
    fn move_file(&mut self, path: &Path, new_folder: &Path) -> ProjsyncResult<PathBuf> {
        self.mutate(|project| {
            let target = project.ops.move_into(path, new_folder)?;
            let (from, to) = (project.relative(path), project.relative(&target));
            project.relocate(&from, &to, false);
            project.save()?;
            Ok(target)
        })
    }

    fn move_folder(&mut self, path: &Path, new_folder: &Path) -> ProjsyncResult<PathBuf> {
        self.mutate(|project| {
            let target = project.ops.move_into(path, new_folder)?;
            let (from, to) = (project.relative(path), project.relative(&target));
            project.relocate(&from, &to, true);
            project.save()?;
            Ok(target)
        })
    }

    fn refresh(&mut self) -> ProjsyncResult<()> {
        self.state = self.state.after_refresh();
        self.ensure_loaded()
    }

    fn invalidate(&mut self) {
        self.state = LoadState::Stale;
    }
}

/// Add a placeholder for `folder` if nothing else keeps it in the tree.
fn keep_folder_visible(editor: &mut ItemEditor<'_>, folder: &Path) {
    let placeholder = IncludePattern::placeholder(folder);
    if placeholder.is_root() {
        return;
    }
    if editor.count(&IncludePattern::folder(folder)) == 0 {
        editor.add(FOLDER_ITEM, &placeholder.include());
    }
}

/// Remove the placeholder of `folder`; the manifest folder has none.
fn drop_placeholder(editor: &mut ItemEditor<'_>, folder: &Path) {
    let placeholder = IncludePattern::placeholder(folder);
    if !placeholder.is_root() {
        editor.remove(&placeholder);
    }
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
