//! Fields command implementation
//!
//! Handles the `html-options fields` command which lists every documented
//! option and the shapes it accepts.

use console::style;

use crate::schema::{options_schema, FieldSpec};

/// One line per documented option: key and accepted shape
pub fn field_lines(fields: &[FieldSpec]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|field| (field.key.to_string(), field.shape.describe()))
        .collect()
}

/// Print the accepted options
pub fn cmd_fields() {
    let lines = field_lines(options_schema().fields());
    let width = lines.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    println!("{}", style("HTML plugin options").bold());
    println!();
    for (key, shape) in &lines {
        let padded = format!("{:width$}", key, width = width);
        println!("  {}  {}", style(padded).cyan(), shape);
    }
    println!();
    println!(
        "  {}",
        style("Any other key is passed through unvalidated to hook consumers.").dim()
    );
}
