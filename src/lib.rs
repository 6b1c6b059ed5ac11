//! projsync - keep project manifests in sync with the files they list
//!
//! A project manifest is an XML document that enumerates source files,
//! folders and references. projsync loads it into a byte-stable document
//! model, rebuilds the virtual file tree it describes, and patches it on every
//! create, rename, move and delete so the manifest and the disk agree.

pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod project;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use document::{Document, DocumentError};
pub use domain::ports::{FileSystem, FsError, ProjectSettings};
pub use domain::value_objects::{
    FileStat, PackageReference, ProjectFile, ProjectFolder, ProjectListing, ProjectReference,
};
pub use error::{ProjsyncError, ProjsyncResult};
pub use infrastructure::LocalFs;
pub use project::{
    open_project, ConventionManifestProject, ExplicitManifestProject, LoadState, Project,
    ProjectKind,
};
