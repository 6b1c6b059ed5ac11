//! Ignore list value object
//!
//! Names hidden from convention-dialect listings (`bin`, `obj`, `*.user`, ...).
//! Entries use gitignore syntax and are matched case-insensitively against
//! the entry name.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use std::path::Path;

/// Compiled ignore list.
#[derive(Debug)]
pub struct IgnoreList {
    matcher: Gitignore,
    pattern_count: usize,
}

impl IgnoreList {
    /// A list that ignores nothing.
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Compile the configured entries.
    ///
    /// Blank entries and `#` comments are skipped. Extensions are written as
    /// globs (`*.user`).
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new("");
        builder
            .case_insensitive(true)
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        let mut pattern_count = 0;
        for entry in entries {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|e| IgnoreError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                })?;
            pattern_count += 1;
        }
        if pattern_count == 0 {
            return Ok(Self::empty());
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check whether an entry named `name` should be hidden.
    ///
    /// `is_dir` should be true if the entry is a directory.
    pub fn is_ignored(&self, name: &str, is_dir: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        self.matcher
            .matched(Path::new(name), is_dir)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when compiling an ignore list.
#[derive(Debug)]
pub enum IgnoreError {
    /// An entry has invalid syntax.
    InvalidPattern { pattern: String, message: String },
    /// Failed to build the gitignore matcher.
    BuildFailed(String),
}

impl fmt::Display for IgnoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, message } => {
                write!(f, "Invalid ignore entry '{}' - {}", pattern, message)
            }
            Self::BuildFailed(msg) => write!(f, "Failed to build ignore list: {}", msg),
        }
    }
}

impl std::error::Error for IgnoreError {}
