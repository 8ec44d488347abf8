//! Structured logging
//!
//! Logs go to stderr so stdout carries only the command/response echo.
//! `RUST_LOG` takes precedence over `-v`.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogFormat;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Level directive for a `-v` count
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber once
pub fn init_logging(verbose: u8, format: LogFormat) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

        let builder = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        // Another subscriber may already be installed (tests, embedding)
        let installed = match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Text => builder.with_ansi(atty::is(atty::Stream::Stderr)).try_init(),
        };

        if installed.is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0, LogFormat::Text);
        init_logging(2, LogFormat::Json);
    }
}
