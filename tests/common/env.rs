//! Test environment for isolated projsync testing.
//!
//! Provides `TestEnv` - a temp directory with a manifest and its files, plus
//! helpers to open the project or run the projsync CLI against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use projsync::{open_project, Config, LocalFs, Project};
use tempfile::TempDir;

/// Result of running a projsync CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// A project in a temp directory.
pub struct TestEnv {
    pub root: TempDir,
    pub manifest: PathBuf,
}

impl TestEnv {
    /// Write `manifest` as `name` and create `files` (with `/` separators).
    pub fn new(name: &str, manifest: &str, files: &[&str]) -> Self {
        let root = tempfile::tempdir().unwrap();
        for file in files {
            let path = root.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        let manifest_path = root.path().join(name);
        fs::write(&manifest_path, manifest).unwrap();
        Self {
            root,
            manifest: manifest_path,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        fs::write(self.path(relative), content).unwrap();
    }

    pub fn manifest_text(&self) -> String {
        fs::read_to_string(&self.manifest).unwrap()
    }

    /// Open the project with default settings.
    pub fn open(&self) -> Box<dyn Project> {
        open_project(&self.manifest, LocalFs::new(), Arc::new(Config::default())).unwrap()
    }

    /// Run projsync from the project directory.
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_with_log(cwd, args, "off")
    }

    /// Run with `RUST_LOG` set, so warnings reach stderr.
    pub fn run_with_log(&self, cwd: &Path, args: &[&str], log: &str) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_projsync"))
            .current_dir(cwd)
            .args(args)
            .env_remove("PROJSYNC_IGNORE")
            .env_remove("PROJSYNC_DEFAULT_ITEM_TYPE")
            .env("RUST_LOG", log)
            .env("XDG_CONFIG_HOME", self.root.path().join(".config"))
            .output()
            .unwrap();
        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Folder and file names of a listing, folders with a trailing `/`.
pub fn summary(listing: &projsync::ProjectListing) -> String {
    listing
        .folders
        .iter()
        .map(|folder| format!("{}/", folder.name))
        .chain(listing.files.iter().map(|file| file.name.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Walk the whole listing and check every entry exists on disk.
pub fn assert_listing_on_disk(project: &mut dyn Project, virtual_path: Option<&Path>) {
    let listing = project.files_and_folders(virtual_path).unwrap();
    for file in &listing.files {
        assert!(file.full_path.is_file(), "{} is listed but missing", file.full_path.display());
        for dependent in &file.dependents {
            assert!(dependent.full_path.is_file(), "{} is missing", dependent.full_path.display());
        }
    }
    for folder in &listing.folders {
        assert!(folder.full_path.is_dir(), "{} is not a folder", folder.full_path.display());
        let child = match virtual_path {
            Some(parent) => parent.join(&folder.name),
            None => PathBuf::from(&folder.name),
        };
        assert_listing_on_disk(project, Some(&child));
    }
}
