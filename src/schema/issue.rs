//! Validation failures

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One field that failed validation
///
/// # Examples
///
/// ```
/// use html_plugin_options::schema::ValidationIssue;
///
/// let issue = ValidationIssue::new("base.target", "invalid value \"_new\"");
/// assert_eq!(issue.field(), "base");
/// assert_eq!(issue.to_string(), "base.target: invalid value \"_new\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending value, empty for the root
    pub path: String,
    /// Why the value was rejected
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Top-level option the issue belongs to
    pub fn field(&self) -> &str {
        let end = self
            .path
            .find(['.', '['])
            .unwrap_or(self.path.len());
        &self.path[..end]
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every issue found in one options object
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid HTML plugin options:{}", render_issues(.issues))]
pub struct ValidationError {
    /// Issues in the order they were found
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Wrap a non-empty issue list
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Whether any issue is rooted at the given top-level option
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field() == field)
    }

    /// Issues rooted at the given top-level option
    pub fn issues_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.field() == field)
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|i| format!("\n  - {}", i)).collect()
}
