//! Physical file operations shared by both project dialects
//!
//! Every operation returns the path it produced, so callers can update the
//! manifest with the real result (a move computes its destination here).

use std::path::{Path, PathBuf};

use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::{
    FileStat, IgnoreList, ProjectFile, ProjectFolder, ProjectListing,
};
use crate::error::{ProjsyncError, ProjsyncResult};

/// File and folder primitives on top of a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FileOps<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> FileOps<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &FS {
        &self.fs
    }

    /// The path `name` would get in `folder`, if it is a valid and unused name.
    pub fn vacant_path(&self, folder: &Path, name: &str) -> ProjsyncResult<PathBuf> {
        check_name(name)?;
        let path = folder.join(name);
        if self.fs.exists(&path) {
            return Err(ProjsyncError::AlreadyExists { path });
        }
        Ok(path)
    }

    /// Create `name` in `folder` with optional initial content.
    pub fn create_file(
        &self,
        folder: &Path,
        name: &str,
        content: Option<&str>,
    ) -> ProjsyncResult<PathBuf> {
        let path = self.vacant_path(folder, name)?;
        self.fs.write(&path, content.unwrap_or_default())?;
        log::info!("created {}", path.display());
        Ok(path)
    }

    pub fn create_folder(&self, path: &Path) -> ProjsyncResult<PathBuf> {
        let name = file_name(path);
        check_name(&name)?;
        if self.fs.exists(path) {
            return Err(ProjsyncError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        self.fs.create_dir_all(path)?;
        log::info!("created folder {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Where `path` ends up when renamed to `new_name`.
    ///
    /// A rename that only changes letter case is allowed even though the
    /// destination "exists" on case-insensitive file systems.
    pub fn renamed_path(&self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf> {
        check_name(new_name)?;
        let target = path.with_file_name(new_name);
        let same_entry = target.to_string_lossy().to_lowercase()
            == path.to_string_lossy().to_lowercase();
        if !same_entry && self.fs.exists(&target) {
            return Err(ProjsyncError::AlreadyExists { path: target });
        }
        Ok(target)
    }

    pub fn rename(&self, path: &Path, new_name: &str) -> ProjsyncResult<PathBuf> {
        let target = self.renamed_path(path, new_name)?;
        if target != path {
            self.fs.rename(path, &target)?;
            log::info!("renamed {} to {}", path.display(), target.display());
        }
        Ok(target)
    }

    /// Move a file or folder into `folder`, keeping its name.
    pub fn move_into(&self, path: &Path, folder: &Path) -> ProjsyncResult<PathBuf> {
        let target = folder.join(file_name(path));
        if target == path {
            return Ok(target);
        }
        if folder.starts_with(path) {
            return Err(FsError::Other(format!(
                "cannot move {} into itself",
                path.display()
            ))
            .into());
        }
        if self.fs.exists(&target) {
            return Err(ProjsyncError::AlreadyExists { path: target });
        }
        self.fs.create_dir_all(folder)?;
        self.fs.rename(path, &target)?;
        log::info!("moved {} to {}", path.display(), target.display());
        Ok(target)
    }

    pub fn delete_file(&self, path: &Path) -> ProjsyncResult<()> {
        self.fs.remove_file(path)?;
        log::info!("deleted {}", path.display());
        Ok(())
    }

    pub fn delete_folder(&self, path: &Path) -> ProjsyncResult<()> {
        self.fs.remove_dir_all(path)?;
        log::info!("deleted folder {}", path.display());
        Ok(())
    }

    pub fn stat(&self, file_path: &Path, folder_path: &Path) -> FileStat {
        let filename = file_name(file_path);
        let full_path = folder_path.join(&filename);
        FileStat {
            exists: self.fs.exists(&full_path),
            filename,
            full_path,
        }
    }

    /// List a directory, skipping ignored entries and `exclude`.
    ///
    /// Entries that can't be stat'ed are logged and skipped. A missing
    /// directory lists as empty.
    pub fn list_dir(
        &self,
        dir: &Path,
        ignore: &IgnoreList,
        exclude: &Path,
    ) -> ProjsyncResult<ProjectListing> {
        let names = match self.fs.read_dir(dir) {
            Ok(names) => names,
            Err(FsError::NotFound(_)) => {
                log::debug!("{} does not exist", dir.display());
                return Ok(ProjectListing::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut listing = ProjectListing::default();
        for name in names {
            let path = dir.join(&name);
            if path == exclude {
                continue;
            }
            let is_dir = match self.fs.is_dir(&path) {
                Ok(is_dir) => is_dir,
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if ignore.is_ignored(&name, is_dir) {
                continue;
            }
            if is_dir {
                listing.folders.push(ProjectFolder::new(path));
            } else {
                listing.files.push(ProjectFile::new(path));
            }
        }
        listing.sort();
        Ok(listing)
    }

    /// Every folder below `root`, depth first, skipping ignored folders.
    ///
    /// Symlinked folders are not followed, so a link to an ancestor can't
    /// loop.
    pub fn walk_folders(&self, root: &Path, ignore: &IgnoreList) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let names = match self.fs.read_dir(&dir) {
                Ok(names) => names,
                Err(e) => {
                    log::warn!("skipping {}: {}", dir.display(), e);
                    continue;
                }
            };
            for name in names {
                let path = dir.join(&name);
                if !matches!(self.fs.is_dir(&path), Ok(true)) || ignore.is_ignored(&name, true) {
                    continue;
                }
                if self.fs.is_symlink(&path) {
                    log::debug!("not following symlink {}", path.display());
                    continue;
                }
                found.push(path.clone());
                pending.push(path);
            }
        }

        found
    }
}

/// Reject names that are empty, dot names or contain a separator.
pub(crate) fn check_name(name: &str) -> ProjsyncResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || name.contains(['/', '\\']) {
        return Err(ProjsyncError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
