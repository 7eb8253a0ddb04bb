//! Configuration for walks.
//!
//! This module provides:
//! - `WalkConfig`: Options controlling traversal and the default reader
//! - Loaders for JSON, YAML and TOML config documents (feature-gated)

mod load;
mod walk;

pub use walk::{DEFAULT_HIDDEN_PREFIX, DEFAULT_SEPARATOR, WalkConfig};
