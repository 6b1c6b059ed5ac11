//! Configuration module for projsync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PROJSYNC_*)
//! 3. Project config (`.projsync.toml` next to the manifest)
//! 4. User config (`<config dir>/projsync/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::Config;
