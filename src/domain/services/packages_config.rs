//! `packages.config` reader
//!
//! Legacy projects list NuGet packages in a sidecar file next to the
//! manifest:
//!
//! ```xml
//! <packages>
//!   <package id="Newtonsoft.Json" version="12.0.3" targetFramework="net472" />
//! </packages>
//! ```
//!
//! Attributes are read by name, so their order in the file doesn't matter.

use crate::document::{self, DocumentError};
use crate::domain::value_objects::PackageReference;

/// File name of the sidecar, relative to the manifest folder.
pub const PACKAGES_CONFIG: &str = "packages.config";

/// Parse the sidecar content into package references.
///
/// `package` elements without an `id` are skipped.
pub fn parse_packages_config(content: &str) -> Result<Vec<PackageReference>, DocumentError> {
    let document = document::parse(content)?;
    let Some(root) = document.root() else {
        return Ok(Vec::new());
    };

    let packages = root
        .elements()
        .filter(|element| element.name() == "package")
        .filter_map(|element| {
            let id = element.attribute("id")?.trim();
            if id.is_empty() {
                return None;
            }
            let version = element
                .attribute("version")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            Some(PackageReference::new(id, version))
        })
        .collect();

    Ok(packages)
}
