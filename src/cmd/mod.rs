//! Command handlers for the html-options CLI
//!
//! Each submodule handles a specific CLI command.

pub mod check;
pub mod fields;

// Re-export command functions for convenient access
pub use check::cmd_check;
pub use fields::cmd_fields;
