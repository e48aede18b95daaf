//! Options schema and validation gate
//!
//! The schema is built on first use and cached for the rest of the process.
//! [`validate`] checks a raw options object against it, reporting every
//! failing field at once, and only then converts it into
//! [`HtmlPluginOptions`].
//!
//! # Examples
//!
//! ```
//! use html_plugin_options::options::{RawValue, ScriptLoading};
//! use html_plugin_options::schema;
//!
//! let raw = RawValue::from(serde_json::json!({
//!     "title": "Dashboard",
//!     "scriptLoading": "module",
//!     "chunks": ["main"],
//! }));
//!
//! let options = schema::validate(&raw).unwrap();
//! assert_eq!(options.script_loading, Some(ScriptLoading::Module));
//!
//! let bad = RawValue::from(serde_json::json!({ "template": "pug-loader!./index.pug" }));
//! let err = schema::validate(&bad).unwrap_err();
//! assert!(err.has_field("template"));
//! ```

pub mod issue;
pub mod shape;

mod decode;

use log::debug;
use std::sync::OnceLock;

use crate::options::{
    BaseTarget, CallableKind, ChunksSortMode, HtmlPluginOptions, InjectPosition, RawValue,
    ScriptLoading, SriAlgorithm,
};

pub use issue::{ValidationError, ValidationIssue};
pub use shape::{FieldSpec, ObjectMode, Shape};

/// Reported when `template` uses loader syntax
pub const TEMPLATE_LOADER_UNSUPPORTED: &str =
    "HtmlRspackPlugin does not support template path with loader yet";

/// Separator of loader chains in a template request
pub const LOADER_DELIMITER: char = '!';

static OPTIONS_SCHEMA: OnceLock<Shape> = OnceLock::new();

/// The options schema, built once per process
pub fn options_schema() -> &'static Shape {
    OPTIONS_SCHEMA.get_or_init(build_options_schema)
}

fn template_has_no_loader(value: &RawValue) -> bool {
    match value {
        RawValue::String(path) => !path.contains(LOADER_DELIMITER),
        _ => true,
    }
}

fn build_options_schema() -> Shape {
    let base_tag = Shape::strict_object(vec![
        FieldSpec::new("href", Shape::String),
        FieldSpec::new("target", Shape::Literal(BaseTarget::VALUES)),
    ]);

    Shape::permissive_object(vec![
        FieldSpec::new("title", Shape::String),
        FieldSpec::new(
            "filename",
            Shape::String.or(Shape::Function(CallableKind::Filename)),
        ),
        FieldSpec::new(
            "template",
            Shape::String.refine(template_has_no_loader, TEMPLATE_LOADER_UNSUPPORTED),
        ),
        FieldSpec::new(
            "templateContent",
            Shape::String.or(Shape::Function(CallableKind::TemplateRender)),
        ),
        FieldSpec::new(
            "templateParameters",
            Shape::record(Shape::String)
                .or(Shape::Boolean)
                .or(Shape::Function(CallableKind::TemplateParams)),
        ),
        FieldSpec::new(
            "inject",
            Shape::Literal(InjectPosition::VALUES).or(Shape::Boolean),
        ),
        FieldSpec::new("publicPath", Shape::String),
        FieldSpec::new("base", Shape::String.or(base_tag)),
        FieldSpec::new("scriptLoading", Shape::Literal(ScriptLoading::VALUES)),
        FieldSpec::new("chunks", Shape::array(Shape::String)),
        FieldSpec::new("excludeChunks", Shape::array(Shape::String)),
        FieldSpec::new("chunksSortMode", Shape::Literal(ChunksSortMode::VALUES)),
        FieldSpec::new("sri", Shape::Literal(SriAlgorithm::VALUES)),
        FieldSpec::new("minify", Shape::Boolean),
        FieldSpec::new("favicon", Shape::String),
        FieldSpec::new(
            "meta",
            Shape::record(Shape::String.or(Shape::record(Shape::String))),
        ),
        FieldSpec::new("hash", Shape::Boolean),
    ])
}

/// Validate raw options and convert them into [`HtmlPluginOptions`]
///
/// All fields are checked before failing; the error lists every problem.
/// Unknown top-level keys are kept in [`HtmlPluginOptions::extra`].
pub fn validate(raw: &RawValue) -> Result<HtmlPluginOptions, ValidationError> {
    let RawValue::Object(map) = raw else {
        return Err(ValidationError::new(vec![ValidationIssue::new(
            "",
            format!("expected object, received {}", raw.kind_name()),
        )]));
    };

    let mut issues = Vec::new();
    options_schema().check(raw, "", &mut issues);

    if !issues.is_empty() {
        debug!("HTML plugin options rejected with {} issue(s)", issues.len());
        return Err(ValidationError::new(issues));
    }

    decode::decode_options(map)
}
