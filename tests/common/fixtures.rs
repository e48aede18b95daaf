//! Options file fixtures
//!
//! Writes realistic options files into temporary directories.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Options accepted by the schema, covering every documented field
pub const VALID_JSON: &str = r##"{
  "title": "Storefront",
  "filename": "pages/index.html",
  "template": "./public/index.html",
  "templateParameters": { "lang": "en" },
  "inject": "body",
  "publicPath": "/assets/",
  "base": { "href": "/shop/", "target": "_self" },
  "scriptLoading": "module",
  "chunks": ["main", "vendor"],
  "excludeChunks": ["admin"],
  "chunksSortMode": "auto",
  "minify": true,
  "favicon": "./favicon.ico",
  "meta": {
    "viewport": "width=device-width, initial-scale=1",
    "theme": { "name": "theme-color", "content": "#222" }
  },
  "hash": true,
  "analyticsId": "UA-1"
}"##;

/// Options with several independent mistakes
pub const INVALID_JSON: &str = r#"{
  "template": "html-loader!./index.html",
  "inject": "footer",
  "base": { "href": "/x", "bogus": 1 },
  "chunks": ["main", 3]
}"#;

/// Same options as [`VALID_JSON`], trimmed, in TOML form
pub const VALID_TOML: &str = r#"
title = "Storefront"
scriptLoading = "defer"
chunks = ["main"]

[meta]
viewport = "width=device-width"
"#;

/// Write `contents` to `name` inside a fresh temporary directory
///
/// # Returns
///
/// A tuple of (TempDir, PathBuf to the file) - the TempDir must be kept alive
pub fn write_options_file(name: &str, contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(name);
    fs::write(&path, contents)?;
    Ok((temp_dir, path))
}
