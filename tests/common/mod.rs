//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Options file fixtures
//! - A stand-in compilation type for registry tests

pub mod fixtures;

use std::sync::Arc;

/// Minimal stand-in for a build's compilation object
#[derive(Debug)]
#[allow(dead_code)]
pub struct Compilation {
    /// Build name, only used for debugging output
    pub name: String,
    /// Owned build state; dropped together with the compilation
    pub assets: Arc<Vec<String>>,
}

/// Create a compilation with a single emitted asset
#[allow(dead_code)]
pub fn compilation(name: &str) -> Arc<Compilation> {
    Arc::new(Compilation {
        name: name.to_string(),
        assets: Arc::new(vec!["main.js".to_string()]),
    })
}
