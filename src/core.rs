use std::path::PathBuf;

use clap::Parser;
use regex::Regex;
use tracing::{debug, info};

use crate::batch::{run_batch, BatchOptions, DEFAULT_HOST, DEFAULT_OUTPUT_DIR, DEFAULT_SHELL};
use crate::catalogue::{format_catalogue_list, Catalogue};
use crate::cli::Args;
use crate::config::Config;
use crate::errors::{ApiExamplesError, Result};
use crate::logging::init_logging;
use crate::status::ExitStatus;

/// Effective settings after merging flags, config file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub output_dir: PathBuf,
    pub shell: String,
    pub catalogue: Option<PathBuf>,
    pub dry_run: bool,
}

impl Settings {
    /// Flags win over the config file, which wins over built-in defaults
    pub fn resolve(args: &Args, config: &Config) -> Self {
        Self {
            host: args
                .host
                .clone()
                .or_else(|| config.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            output_dir: args
                .output_dir
                .clone()
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            shell: args
                .shell
                .clone()
                .or_else(|| config.shell.clone())
                .unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            catalogue: args.catalogue.clone().or_else(|| config.catalogue.clone()),
            dry_run: args.dry_run,
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            host: self.host.trim_end_matches('/').to_string(),
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            echo: true,
        }
    }
}

/// Main entry point for the CLI.
///
/// Parses arguments, sets up logging and reports the first error on stderr.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(parsed.verbose, parsed.log_format.unwrap_or_default());

    match execute(&parsed) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitStatus::Error
        }
    }
}

/// Run with already parsed arguments
pub fn execute(args: &Args) -> Result<ExitStatus> {
    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(args, &config);
    debug!(?settings, config = ?config.source, "Settings resolved");

    let mut catalogue = load_catalogue(&settings)?;

    if let Some(ref pattern) = args.only {
        let filter = Regex::new(pattern)?;
        catalogue.retain_matching(&filter);
        if catalogue.is_empty() {
            return Err(ApiExamplesError::Argument(format!(
                "No examples match --only '{}'",
                pattern
            )));
        }
    }

    if args.list {
        print!("{}", format_catalogue_list(&catalogue));
        return Ok(ExitStatus::Success);
    }

    run_batch(&catalogue, settings.batch_options(), &settings.shell)
}

fn load_catalogue(settings: &Settings) -> Result<Catalogue> {
    let catalogue = match settings.catalogue {
        Some(ref path) => {
            info!(path = %path.display(), "Loading catalogue");
            Catalogue::load(path)?
        }
        None => Catalogue::builtin()?,
    };

    if !catalogue.duplicates().is_empty() {
        info!(
            count = catalogue.duplicates().len(),
            "Catalogue has repeated names; later definitions replaced earlier ones"
        );
    }

    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&Args::default(), &Config::default());
        assert_eq!(settings.host, "http://localhost:8000");
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.shell, "sh");
        assert!(settings.catalogue.is_none());
    }

    #[test]
    fn test_precedence() {
        let config = Config {
            host: Some("http://config:1".to_string()),
            output_dir: Some(PathBuf::from("from-config")),
            shell: Some("bash".to_string()),
            ..Default::default()
        };
        let args = Args {
            host: Some("http://flag:2".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve(&args, &config);
        assert_eq!(settings.host, "http://flag:2");
        assert_eq!(settings.output_dir, PathBuf::from("from-config"));
        assert_eq!(settings.shell, "bash");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let args = Args {
            host: Some("http://localhost:8000/".to_string()),
            ..Default::default()
        };
        let options = Settings::resolve(&args, &Config::default()).batch_options();
        assert_eq!(options.host, "http://localhost:8000");
    }

    #[test]
    fn test_help_is_success() {
        assert_eq!(run(vec!["api-examples".into(), "--help".into()]), ExitStatus::Success);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        assert_eq!(run(vec!["api-examples".into(), "--bogus".into()]), ExitStatus::Error);
    }
}
