//! Domain Layer
//!
//! The manifest-independent core of projsync.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (references, include paths, listings)
//! - `services/` - Pure services (virtual tree, packages.config reader)
//! - `ports/` - Interface definitions for infrastructure and settings
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod ports;
pub mod services;
pub mod value_objects;
