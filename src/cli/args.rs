//! CLI argument definitions using clap
//!
//! Running without arguments generates every example against
//! `http://localhost:8000` into `./output`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "api-examples", version, about, long_about = None)]
pub struct Args {
    // =========================================================================
    // TARGET
    // =========================================================================

    /// Base URL of the running application [default: http://localhost:8000]
    #[arg(long = "host", value_name = "URL")]
    pub host: Option<String>,

    /// Directory for the generated fixtures [default: output]
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Shell used to run the generated commands [default: sh]
    #[arg(long = "shell", value_name = "PROGRAM")]
    pub shell: Option<String>,

    // =========================================================================
    // CATALOGUE
    // =========================================================================

    /// Load requests from a YAML catalogue instead of the built-in one
    #[arg(long = "catalogue", alias = "catalog", value_name = "FILE")]
    pub catalogue: Option<PathBuf>,

    /// Only process examples whose name matches this regular expression
    #[arg(long = "only", value_name = "REGEX")]
    pub only: Option<String>,

    /// List the examples and exit
    #[arg(long = "list", action = ArgAction::SetTrue)]
    pub list: bool,

    /// Write the command files without running them
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    // =========================================================================
    // CONFIGURATION & LOGGING
    // =========================================================================

    /// Config file (default: $API_EXAMPLES_CONFIG, ./api-examples.toml)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging. Use -vv for even more verbose
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Log format: text (default) or json (JSON Lines)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log format for structured output
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
