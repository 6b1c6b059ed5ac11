//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ports::ProjectSettings;
use crate::error::ProjsyncResult;

use super::loader::{self, ConfigWarning};

/// Main configuration structure
///
/// ```toml
/// ignore = ["bin", "obj", "*.user"]
///
/// [item_types]
/// cs = "Compile"
/// "*" = "Content"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Entries hidden from convention-dialect listings (gitignore syntax)
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Lower-cased extension to item type for new files; `"*"` is the fallback
    #[serde(default = "default_item_types")]
    pub item_types: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            item_types: default_item_types(),
        }
    }
}

fn default_ignore() -> Vec<String> {
    ["bin", "obj", "node_modules", ".vs", ".git", "*.user"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_item_types() -> BTreeMap<String, String> {
    [
        ("cs", "Compile"),
        ("vb", "Compile"),
        ("fs", "Compile"),
        ("c", "ClCompile"),
        ("cpp", "ClCompile"),
        ("cxx", "ClCompile"),
        ("h", "ClInclude"),
        ("hpp", "ClInclude"),
        ("ts", "TypeScriptCompile"),
        ("resx", "EmbeddedResource"),
        ("*", "Content"),
    ]
    .into_iter()
    .map(|(ext, item_type)| (ext.to_string(), item_type.to_string()))
    .collect()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProjsyncResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ProjsyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_dir: Option<&Path>) -> Self {
        loader::load_or_default(project_dir)
    }

    /// Load from project config, user config, or defaults, with the
    /// warnings of the file that was used.
    pub fn load_or_default_with_warnings(project_dir: Option<&Path>) -> (Self, Vec<ConfigWarning>) {
        loader::load_or_default_with_warnings(project_dir)
    }

    /// Apply environment variable overrides (PROJSYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}

impl ProjectSettings for Config {
    fn item_types(&self) -> BTreeMap<String, String> {
        self.item_types
            .iter()
            .map(|(ext, item_type)| (ext.to_lowercase(), item_type.clone()))
            .collect()
    }

    fn ignore_list(&self) -> Vec<String> {
        self.ignore.clone()
    }
}
