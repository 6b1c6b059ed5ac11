//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

pub mod ignore_list;
pub mod include_path;
mod project_item;
mod references;

pub use ignore_list::{IgnoreError, IgnoreList};
pub use include_path::{IncludePattern, PatternKind};
pub use project_item::{FileStat, ProjectFile, ProjectFolder, ProjectListing};
pub use references::{PackageReference, ProjectReference};
