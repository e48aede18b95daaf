//! Loosely typed option input
//!
//! [`RawValue`] is what callers hand to the validator: a JSON-like tree that
//! can also carry functions. Functions are tagged with the role they were
//! written for so the schema never has to inspect a closure signature.

use indexmap::IndexMap;
use std::fmt;

use super::types::{FilenameFn, OpaqueFn, TemplateParamsFn, TemplateRenderFn};

/// Object node of a raw value, in the order the keys were written
pub type RawObject = IndexMap<String, RawValue>;

/// Role a user function was declared for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// `(entry) -> path`
    Filename,
    /// `(params) -> html`
    TemplateRender,
    /// `(params) -> params`
    TemplateParams,
    /// Anything else, only valid under extension keys
    Opaque,
}

impl CallableKind {
    /// Human readable name used in validation messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Filename => "filename function",
            Self::TemplateRender => "template render function",
            Self::TemplateParams => "template parameters function",
            Self::Opaque => "function",
        }
    }
}

/// A user function tagged with its role
#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    /// See [`CallableKind::Filename`]
    Filename(FilenameFn),
    /// See [`CallableKind::TemplateRender`]
    TemplateRender(TemplateRenderFn),
    /// See [`CallableKind::TemplateParams`]
    TemplateParams(TemplateParamsFn),
    /// See [`CallableKind::Opaque`]
    Opaque(OpaqueFn),
}

impl Callable {
    /// Role of this function
    pub fn kind(&self) -> CallableKind {
        match self {
            Self::Filename(_) => CallableKind::Filename,
            Self::TemplateRender(_) => CallableKind::TemplateRender,
            Self::TemplateParams(_) => CallableKind::TemplateParams,
            Self::Opaque(_) => CallableKind::Opaque,
        }
    }
}

/// Untyped configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any JSON number
    Number(serde_json::Number),
    /// Text
    String(String),
    /// Ordered sequence
    Array(Vec<RawValue>),
    /// String-keyed mapping
    Object(RawObject),
    /// User function
    Function(Callable),
}

impl RawValue {
    /// Build an object from key/value pairs
    ///
    /// # Examples
    ///
    /// ```
    /// use html_plugin_options::options::RawValue;
    ///
    /// let raw = RawValue::object([("title", RawValue::from("Home")), ("minify", true.into())]);
    /// assert_eq!(raw.get("title"), Some(&RawValue::from("Home")));
    /// ```
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RawValue)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a key if this is an object
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Name of the value's kind, as used in validation messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(callable) => callable.kind().describe(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            other => f.write_str(other.kind_name()),
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Callable> for RawValue {
    fn from(value: Callable) -> Self {
        Self::Function(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}
