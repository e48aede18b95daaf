#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! html-plugin-options library
//!
//! Options gate for an HTML generation build plugin: a fixed schema that
//! rejects malformed configuration with every problem listed at once, and a
//! registry that keeps validated options per compilation and plugin instance
//! without keeping compilations alive.
//!
//! # Basic Example
//!
//! Validating raw options:
//!
//! ```
//! use html_plugin_options::options::{Inject, InjectPosition, RawValue};
//! use html_plugin_options::schema;
//!
//! let raw = RawValue::from(serde_json::json!({
//!     "title": "Home",
//!     "inject": "body",
//!     "myHookOption": { "anything": true },
//! }));
//!
//! let options = schema::validate(&raw).unwrap();
//! assert_eq!(options.inject, Some(Inject::Position(InjectPosition::Body)));
//! assert!(options.extra.contains_key("myHookOption"));
//! ```
//!
//! # Advanced Example: Options per Compilation
//!
//! Registering options for two plugin instances of one build:
//!
//! ```
//! use std::sync::Arc;
//! use html_plugin_options::options::RawValue;
//! use html_plugin_options::registry::{HostObject, OptionsRegistry};
//! use html_plugin_options::schema;
//!
//! struct Compilation {
//!     name: String,
//! }
//!
//! let registry = OptionsRegistry::<Compilation>::new();
//! let compilation: HostObject = Arc::new(Compilation { name: "client".into() });
//!
//! let index = schema::validate(&serde_json::json!({ "filename": "index.html" }).into())?;
//! let admin = schema::validate(&serde_json::json!({ "filename": "admin.html" }).into())?;
//! registry.register(&compilation, 0, index)?;
//! registry.register(&compilation, 1, admin)?;
//!
//! assert!(registry.lookup(&compilation, 1)?.is_some());
//! registry.remove(&compilation, 1)?;
//! assert!(registry.lookup(&compilation, 1)?.is_none());
//!
//! // Anything that is not a Compilation is rejected
//! let not_a_compilation: HostObject = Arc::new(42u32);
//! assert!(registry.lookup(&not_a_compilation, 0).is_err());
//! # Ok::<(), html_plugin_options::error::HtmlPluginError>(())
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Error types with contextual suggestions
pub mod error;
/// Shared console output helpers
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Options file loading
pub mod loader;
/// Raw and typed option shapes
pub mod options;
/// Compilation-scoped options registry
pub mod registry;
/// Options schema and validation
pub mod schema;
