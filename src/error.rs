//! Error types for projsync
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentError;
use crate::domain::ports::FsError;
use crate::domain::value_objects::IgnoreError;

/// Result type alias for projsync operations
pub type ProjsyncResult<T> = Result<T, ProjsyncError>;

/// Main error type for projsync operations
#[derive(Error, Debug)]
pub enum ProjsyncError {
    /// A manifest or sidecar file is not well-formed XML
    #[error("malformed XML in {file}: {source}")]
    Manifest {
        file: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// A file system operation failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// The target of a create, rename or move is already taken
    #[error("'{path}' already exists")]
    AlreadyExists { path: PathBuf },

    /// A new file or folder name is empty or contains a separator
    #[error("invalid name '{name}'")]
    InvalidName { name: String },

    /// Configuration file could not be read or parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The configured ignore list does not compile
    #[error("invalid ignore list: {0}")]
    Ignore(#[from] IgnoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjsyncError {
    pub(crate) fn manifest(file: impl Into<PathBuf>, source: DocumentError) -> Self {
        Self::Manifest {
            file: file.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_manifest() {
        let err = ProjsyncError::manifest(
            "App.csproj",
            DocumentError::Unclosed {
                name: "ItemGroup".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "malformed XML in App.csproj: unclosed element <ItemGroup>"
        );
    }

    #[test]
    fn test_error_display_already_exists() {
        let err = ProjsyncError::AlreadyExists {
            path: PathBuf::from("src/Program.cs"),
        };
        assert_eq!(err.to_string(), "'src/Program.cs' already exists");
    }

    #[test]
    fn test_fs_error_is_transparent() {
        let err: ProjsyncError = FsError::NotFound(PathBuf::from("a.cs")).into();
        assert_eq!(err.to_string(), "File not found: a.cs");
    }
}
