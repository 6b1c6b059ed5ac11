//! Project and package reference value objects
//!
//! Both are rebuilt from scratch every time a manifest is parsed and never
//! change afterwards.

use serde::Serialize;

/// A reference to another project (or, in the explicit dialect, an assembly).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectReference {
    name: String,
    path: String,
}

impl ProjectReference {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// From a `ProjectReference` include: the name is the file stem of the
    /// referenced manifest.
    ///
    /// ```
    /// use projsync::domain::value_objects::ProjectReference;
    ///
    /// let reference = ProjectReference::from_project_include(r"..\Core\Core.csproj");
    /// assert_eq!(reference.name(), "Core");
    /// ```
    pub fn from_project_include(include: &str) -> Self {
        let include = include.trim();
        let file_name = include.rsplit(['\\', '/']).next().unwrap_or(include);
        let name = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        Self::new(name, include)
    }

    /// From a legacy `Reference` include such as
    /// `Newtonsoft.Json, Version=12.0.0.0, Culture=neutral`.
    pub fn from_assembly_include(include: &str) -> Self {
        let include = include.trim();
        let name = include.split(',').next().unwrap_or(include).trim();
        Self::new(name, include)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The include exactly as written in the manifest.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A package dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageReference {
    name: String,
    version: Option<String>,
}

impl PackageReference {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
