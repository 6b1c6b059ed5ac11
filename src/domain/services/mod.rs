//! Domain Services
//!
//! Pure logic over manifest data. These services have no I/O dependencies
//! and are easily testable.

pub mod packages_config;
pub mod virtual_tree;

pub use packages_config::{parse_packages_config, PACKAGES_CONFIG};
pub use virtual_tree::{build_tree, common_prefix, find_level, resolve_path, TreePart};
