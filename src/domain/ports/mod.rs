//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure and configuration provide concrete implementations.

pub mod file_system;
pub mod settings;

pub use file_system::{FileSystem, FsError, FsResult};
pub use settings::{ProjectSettings, UNTYPED_ITEM, WILDCARD_EXTENSION};
