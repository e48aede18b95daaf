//! Check command implementation
//!
//! Handles the `html-options check` command which loads an options file and
//! runs it through the validation gate, listing every problem at once.

use anyhow::Result;
use console::style;
use serde::Serialize;
use std::path::Path;

use crate::error::HtmlPluginError;
use crate::fmt::{icon, CHECKMARK, CROSSMARK, INFO};
use crate::loader::OptionsLoader;
use crate::options::HtmlPluginOptions;
use crate::schema::{self, ValidationIssue};

/// JSON report printed by `check --json`
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Checked file
    pub file: String,
    /// Whether the options passed validation
    pub valid: bool,
    /// Every issue found, empty when valid
    pub issues: Vec<ValidationIssue>,
    /// Undeclared keys passed through to hook consumers
    pub extension_keys: Vec<String>,
}

impl CheckReport {
    fn new(path: &Path, outcome: &Result<HtmlPluginOptions, schema::ValidationError>) -> Self {
        let (issues, extension_keys) = match outcome {
            Ok(options) => (Vec::new(), options.extra.keys().cloned().collect()),
            Err(err) => (err.issues.clone(), Vec::new()),
        };
        Self {
            file: path.display().to_string(),
            valid: outcome.is_ok(),
            issues,
            extension_keys,
        }
    }
}

/// Validate an options file
///
/// # Examples
///
/// ```no_run
/// use html_plugin_options::cmd::check::cmd_check;
///
/// cmd_check("html-plugin.json", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the options
/// fail validation.
pub fn cmd_check(file: &str, json: bool) -> Result<()> {
    let path = Path::new(file);
    let raw = OptionsLoader::load(path)?;
    let outcome = schema::validate(&raw);
    let report = CheckReport::new(path, &outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    match outcome {
        Ok(_) => Ok(()),
        Err(err) => Err(HtmlPluginError::Validation(err).into()),
    }
}

fn print_report(report: &CheckReport) {
    if report.valid {
        println!(
            "{} {} is valid",
            icon(CHECKMARK),
            style(&report.file).bold()
        );
        if !report.extension_keys.is_empty() {
            println!(
                "{}  Passed through to hooks: {}",
                icon(INFO),
                style(report.extension_keys.join(", ")).dim()
            );
        }
        return;
    }

    println!(
        "{} {} has {} problem(s):",
        icon(CROSSMARK),
        style(&report.file).bold(),
        report.issues.len()
    );
    for issue in &report.issues {
        let path = if issue.path.is_empty() {
            "(root)"
        } else {
            issue.path.as_str()
        };
        println!("   {} {}: {}", style("•").dim(), style(path).cyan(), issue.message);
    }
}
