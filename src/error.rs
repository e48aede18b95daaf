//! Error types with contextual suggestions
//!
//! Callers of the registry and the validator handle two failure modes:
//! - [`HtmlPluginError::ContractViolation`], a non-compilation handed to the
//!   registry (a caller bug)
//! - [`HtmlPluginError::Validation`], malformed options the user can fix
//!
//! The remaining variants come from reading options files.
//!
//! # Examples
//!
//! ```
//! use html_plugin_options::error::HtmlPluginError;
//! use html_plugin_options::options::RawValue;
//! use html_plugin_options::schema;
//!
//! let raw = RawValue::from(serde_json::json!({ "inject": "footer" }));
//! let err: HtmlPluginError = schema::validate(&raw).unwrap_err().into();
//!
//! assert_eq!(err.exit_code(), 65);
//! assert!(err.suggestion().unwrap().contains("inject"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ValidationError;

/// Errors surfaced by the options gate and registry
#[derive(Error, Debug)]
pub enum HtmlPluginError {
    /// Registry called with something that is not a compilation
    #[error("The 'compilation' argument must be an instance of {expected} ({operation})")]
    ContractViolation {
        /// Type the registry is keyed by
        expected: &'static str,
        /// Registry operation that was called
        operation: &'static str,
    },

    /// Options do not match the schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Options file not found
    #[error("Options file not found: {path}")]
    ConfigNotFound {
        /// Path to options file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Options file could not be parsed
    #[error("Failed to parse {path}: {message}")]
    ConfigParse {
        /// Path to options file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Options file extension is neither JSON nor TOML
    #[error("Unsupported options file format: {path}")]
    UnsupportedFormat {
        /// Path to options file
        path: PathBuf,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl HtmlPluginError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ContractViolation { operation, .. } => Some(format!(
                "Pass the compilation object received from the build hook to {}",
                operation
            )),
            Self::Validation(err) => {
                let mut fields: Vec<&str> = err.issues.iter().map(|i| i.field()).collect();
                fields.dedup();
                Some(format!(
                    "Fix the following options and retry: {}",
                    fields.join(", ")
                ))
            }
            Self::ConfigNotFound { path, .. } => Some(format!(
                "Create {} or pass the path to an existing options file",
                path.display()
            )),
            Self::ConfigParse { .. } => {
                Some("Check the file for syntax errors near the reported position".to_string())
            }
            Self::UnsupportedFormat { .. } => {
                Some("Use a .json or .toml options file".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ContractViolation { .. } => 70, // EX_SOFTWARE
            Self::Validation(_) => 65,            // EX_DATAERR
            Self::ConfigNotFound { .. } => 66,    // EX_NOINPUT
            Self::ConfigParse { .. } => 65,       // EX_DATAERR
            Self::UnsupportedFormat { .. } => 64, // EX_USAGE
            Self::Io { .. } => 74,                // EX_IOERR
        }
    }

    /// Returns the validation error if this is a `Validation` variant.
    pub fn as_validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(plugin_error) = error.downcast_ref::<HtmlPluginError>() {
            if let Some(suggestion) = plugin_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(plugin_error) = error.downcast_ref::<HtmlPluginError>() {
            plugin_error.exit_code()
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationIssue;

    fn validation_error() -> HtmlPluginError {
        HtmlPluginError::Validation(ValidationError::new(vec![
            ValidationIssue::new("chunks[0]", "expected string, received number"),
            ValidationIssue::new("chunks[2]", "expected string, received null"),
            ValidationIssue::new("base", "unrecognized key \"bogus\""),
        ]))
    }

    #[test]
    fn test_contract_violation_names_expected_type() {
        let err = HtmlPluginError::ContractViolation {
            expected: "Compilation",
            operation: "lookup",
        };
        let msg = err.to_string();
        assert!(msg.contains("must be an instance of Compilation"));
        assert!(msg.contains("lookup"));
        assert_eq!(err.exit_code(), 70);
    }

    #[test]
    fn test_validation_suggestion_lists_each_field_once() {
        let suggestion = validation_error()
            .suggestion()
            .expect("Validation should have suggestion");
        assert!(suggestion.ends_with("chunks, base"));
    }

    #[test]
    fn test_validation_message_is_transparent() {
        let err = validation_error();
        assert!(err.to_string().starts_with("invalid HTML plugin options:"));
        assert!(err.as_validation_error().is_some());
    }

    #[test]
    fn test_all_error_variants_have_suggestions_and_exit_codes() {
        let errors = vec![
            HtmlPluginError::ContractViolation {
                expected: "Compilation",
                operation: "register",
            },
            validation_error(),
            HtmlPluginError::ConfigNotFound {
                path: PathBuf::from("html.json"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
            },
            HtmlPluginError::ConfigParse {
                path: PathBuf::from("html.json"),
                message: "expected value".to_string(),
            },
            HtmlPluginError::UnsupportedFormat {
                path: PathBuf::from("html.yaml"),
            },
            HtmlPluginError::Io {
                context: "reading html.json".to_string(),
                source: std::io::Error::other("test"),
            },
        ];

        for err in &errors {
            assert!(err.suggestion().is_some_and(|s| !s.is_empty()));
            let code = err.exit_code();
            assert!(code > 0 && code < 256, "bad exit code for {:?}", err);
        }
    }

    #[test]
    fn test_formatter_includes_help_line() {
        let err = anyhow::Error::new(validation_error());
        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("help:"));
        assert!(formatted.contains("chunks[2]"));
        assert_eq!(ErrorFormatter::exit_code(&err), 65);
    }

    #[test]
    fn test_formatter_falls_back_for_foreign_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(!ErrorFormatter::format(&err).contains("help:"));
    }
}
