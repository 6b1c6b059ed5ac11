//! Common test utilities for projsync integration tests.
//!
//! This module provides:
//! - `TestEnv`: a temp directory holding a project, plus CLI helpers
//! - Fixtures: reusable manifests

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
