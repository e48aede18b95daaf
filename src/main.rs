use clap::{Parser, Subcommand};
use html_plugin_options::cmd;
use html_plugin_options::error::ErrorFormatter;
use std::process;

/// HTML plugin options checker
///
/// Validates HTML plugin options files against the plugin's schema and
/// reports every problem in one pass.
#[derive(Parser)]
#[command(name = "html-options", author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an options file (.json or .toml)
    Check {
        /// Options file to validate
        #[arg(value_name = "FILE", default_value = html_plugin_options::loader::OPTIONS_FILE_NAME)]
        file: String,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,
    },

    /// List the accepted options and their shapes
    Fields,
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Commands::Check { file, json } => cmd::cmd_check(file, *json),
        Commands::Fields => {
            cmd::cmd_fields();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprint!("{}", ErrorFormatter::format(&e));
        process::exit(ErrorFormatter::exit_code(&e));
    }
}
