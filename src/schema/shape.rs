//! Declarative value shapes
//!
//! A [`Shape`] describes what a [`RawValue`] may look like and collects every
//! mismatch it finds rather than stopping at the first one. Objects come in
//! two modes: permissive objects pass unknown keys through, strict objects
//! report them.

use super::issue::ValidationIssue;
use crate::options::{CallableKind, RawValue};

/// How an object treats keys it does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMode {
    /// Unknown keys are accepted as-is
    Permissive,
    /// Unknown keys are reported
    Strict,
}

/// Extra predicate applied after the inner shape matched
#[derive(Debug, Clone, Copy)]
pub struct Refinement {
    /// Returns `true` when the value is acceptable
    pub check: fn(&RawValue) -> bool,
    /// Reported when `check` fails
    pub message: &'static str,
}

/// Optional key of an object shape
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Key as written in configuration
    pub key: &'static str,
    /// Accepted shape of the value
    pub shape: Shape,
}

impl FieldSpec {
    /// Declare an optional key
    pub fn new(key: &'static str, shape: Shape) -> Self {
        Self { key, shape }
    }
}

/// Accepted shape of a value
#[derive(Debug, Clone)]
pub enum Shape {
    /// Any string
    String,
    /// `true` or `false`
    Boolean,
    /// One of a fixed set of strings
    Literal(&'static [&'static str]),
    /// Sequence whose items match the inner shape
    Array(Box<Shape>),
    /// String-keyed map whose values match the inner shape
    Record(Box<Shape>),
    /// Object with optional declared keys
    Object {
        /// Declared keys
        fields: Vec<FieldSpec>,
        /// Handling of undeclared keys
        mode: ObjectMode,
    },
    /// Function declared for the given role
    Function(CallableKind),
    /// First alternative whose kind matches decides
    Union(Vec<Shape>),
    /// Inner shape plus a predicate
    Refined(Box<Shape>, Refinement),
}

impl Shape {
    /// Array of `inner`
    pub fn array(inner: Shape) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Record of `inner`
    pub fn record(inner: Shape) -> Self {
        Self::Record(Box::new(inner))
    }

    /// Object that reports unknown keys
    pub fn strict_object(fields: Vec<FieldSpec>) -> Self {
        Self::Object {
            fields,
            mode: ObjectMode::Strict,
        }
    }

    /// Object that passes unknown keys through
    pub fn permissive_object(fields: Vec<FieldSpec>) -> Self {
        Self::Object {
            fields,
            mode: ObjectMode::Permissive,
        }
    }

    /// `self` or `other`
    pub fn or(self, other: Shape) -> Self {
        match self {
            Self::Union(mut alternatives) => {
                alternatives.push(other);
                Self::Union(alternatives)
            }
            first => Self::Union(vec![first, other]),
        }
    }

    /// `self` with an additional predicate
    pub fn refine(self, check: fn(&RawValue) -> bool, message: &'static str) -> Self {
        Self::Refined(Box::new(self), Refinement { check, message })
    }

    /// Declared keys when this is an object shape
    pub fn fields(&self) -> &[FieldSpec] {
        match self {
            Self::Object { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Whether the value is of the kind this shape expects, ignoring contents
    fn accepts_kind(&self, value: &RawValue) -> bool {
        match (self, value) {
            (Self::String | Self::Literal(_), RawValue::String(_)) => true,
            (Self::Boolean, RawValue::Bool(_)) => true,
            (Self::Array(_), RawValue::Array(_)) => true,
            (Self::Record(_) | Self::Object { .. }, RawValue::Object(_)) => true,
            (Self::Function(kind), RawValue::Function(callable)) => callable.kind() == *kind,
            (Self::Union(alternatives), value) => alternatives.iter().any(|a| a.accepts_kind(value)),
            (Self::Refined(inner, _), value) => inner.accepts_kind(value),
            _ => false,
        }
    }

    /// Human readable description of the accepted values
    pub fn describe(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Literal(values) => values
                .iter()
                .map(|v| format!("{:?}", v))
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Array(inner) => format!("array of {}", inner.describe()),
            Self::Record(inner) => format!("map of string to {}", inner.describe()),
            Self::Object { fields, mode } => {
                let keys = fields.iter().map(|f| f.key).collect::<Vec<_>>().join(", ");
                match mode {
                    ObjectMode::Strict => format!("{{ {} }}", keys),
                    ObjectMode::Permissive => format!("{{ {}, .. }}", keys),
                }
            }
            Self::Function(kind) => kind.describe().to_string(),
            Self::Union(alternatives) => alternatives
                .iter()
                .map(Shape::describe)
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Refined(inner, _) => inner.describe(),
        }
    }

    /// Check `value` against this shape, appending every mismatch to `issues`
    pub fn check(&self, value: &RawValue, path: &str, issues: &mut Vec<ValidationIssue>) {
        match (self, value) {
            (Self::String, RawValue::String(_)) | (Self::Boolean, RawValue::Bool(_)) => {}
            (Self::Literal(values), RawValue::String(s)) => {
                if !values.contains(&s.as_str()) {
                    issues.push(ValidationIssue::new(
                        path,
                        format!("invalid value {:?}, expected {}", s, self.describe()),
                    ));
                }
            }
            (Self::Array(inner), RawValue::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    inner.check(item, &index_path(path, index), issues);
                }
            }
            (Self::Record(inner), RawValue::Object(map)) => {
                for (key, item) in map {
                    inner.check(item, &child_path(path, key), issues);
                }
            }
            (Self::Object { fields, mode }, RawValue::Object(map)) => {
                for field in fields {
                    if let Some(item) = map.get(field.key) {
                        field.shape.check(item, &child_path(path, field.key), issues);
                    }
                }
                if *mode == ObjectMode::Strict {
                    for key in map.keys() {
                        if !fields.iter().any(|f| f.key == key.as_str()) {
                            issues.push(ValidationIssue::new(
                                path,
                                format!("unrecognized key {:?}", key),
                            ));
                        }
                    }
                }
            }
            (Self::Function(kind), RawValue::Function(callable)) if callable.kind() == *kind => {}
            (Self::Union(alternatives), value) => {
                match alternatives.iter().find(|a| a.accepts_kind(value)) {
                    Some(alternative) => alternative.check(value, path, issues),
                    None => issues.push(mismatch(self, value, path)),
                }
            }
            (Self::Refined(inner, refinement), value) => {
                let before = issues.len();
                inner.check(value, path, issues);
                if issues.len() == before && !(refinement.check)(value) {
                    issues.push(ValidationIssue::new(path, refinement.message));
                }
            }
            (shape, value) => issues.push(mismatch(shape, value, path)),
        }
    }
}

fn mismatch(shape: &Shape, value: &RawValue, path: &str) -> ValidationIssue {
    ValidationIssue::new(
        path,
        format!("expected {}, received {}", shape.describe(), value.kind_name()),
    )
}

pub(crate) fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}
