//! Batch runner
//!
//! Walks the catalogue in order: render, write the command fixture, run it,
//! write the response fixture. The first failing command or unparseable
//! response aborts the batch.

use std::io::Write;
use std::path::PathBuf;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use super::shell::{CommandOutput, CommandRunner};
use crate::catalogue::{Catalogue, RequestDescriptor};
use crate::errors::{ApiExamplesError, Result};
use crate::output::FixtureWriter;
use crate::render::render_curl_command;
use crate::signals;

/// Host the documentation examples are generated against
pub const DEFAULT_HOST: &str = "http://localhost:8000";

/// Directory fixtures are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Options for a batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Base URL prepended to every catalogue URL
    pub host: String,

    /// Fixture directory
    pub output_dir: PathBuf,

    /// Write command fixtures only
    pub dry_run: bool,

    /// Print each command and raw response to stdout
    pub echo: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dry_run: false,
            echo: true,
        }
    }
}

/// What happened to one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Response fixture written
    Written(PathBuf),
    /// The command printed nothing; no response fixture
    EmptyResponse,
    /// Command not run
    DryRun,
}

/// Result of one catalogue entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryResult {
    pub name: String,
    pub command_path: PathBuf,
    pub outcome: EntryOutcome,
}

/// Result of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<EntryResult>,
    /// Stopped early by Ctrl+C
    pub interrupted: bool,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Written(_)))
    }

    pub fn empty(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::EmptyResponse))
    }

    pub fn dry_run(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::DryRun))
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Catalogue batch runner
pub struct BatchRunner<R> {
    options: BatchOptions,
    runner: R,
    writer: FixtureWriter,
    interrupted: Box<dyn Fn() -> bool>,
}

impl<R: CommandRunner> BatchRunner<R> {
    pub fn new(options: BatchOptions, runner: R) -> Self {
        let writer = FixtureWriter::new(options.output_dir.clone());
        Self {
            options,
            runner,
            writer,
            interrupted: Box::new(signals::was_interrupted),
        }
    }

    /// Replace the interrupt check (defaults to the Ctrl+C flag)
    pub fn with_interrupt_check(mut self, check: impl Fn() -> bool + 'static) -> Self {
        self.interrupted = Box::new(check);
        self
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process every entry of the catalogue in order
    pub fn run(&self, catalogue: &Catalogue) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for (name, request) in catalogue.iter() {
            if (self.interrupted)() {
                info!(processed = report.results.len(), "Interrupted");
                report.interrupted = true;
                break;
            }

            let result = match self.run_entry(name, request) {
                Ok(result) => result,
                // A command killed by the same Ctrl+C ends the batch quietly
                Err(ApiExamplesError::CommandFailed { .. }) if (self.interrupted)() => {
                    info!(name = %name, "Command stopped by interrupt");
                    report.interrupted = true;
                    break;
                }
                Err(e) => return Err(e),
            };
            report.results.push(result);
        }

        Ok(report)
    }

    /// Process a single entry
    pub fn run_entry(&self, name: &str, request: &RequestDescriptor) -> Result<EntryResult> {
        let command = render_curl_command(&self.options.host, request)?;
        let command_path = self.writer.write_command(name, &command)?;

        if self.options.dry_run {
            debug!(name = %name, "Dry run, command not executed");
            return Ok(EntryResult {
                name: name.to_string(),
                command_path,
                outcome: EntryOutcome::DryRun,
            });
        }

        info!(name = %name, method = %request.method, url = %request.url, "Running example");
        let output = self.runner.run(&command)?;

        if !output.success() {
            return Err(ApiExamplesError::CommandFailed {
                name: name.to_string(),
                code: output.code,
                stderr: output.stderr_lossy(),
            });
        }

        if output.is_empty() {
            debug!(name = %name, "Empty response, no output fixture");
            return Ok(EntryResult {
                name: name.to_string(),
                command_path,
                outcome: EntryOutcome::EmptyResponse,
            });
        }

        if self.options.echo {
            self.echo(&command, &output)?;
        }

        let response: JsonValue = serde_json::from_slice(&output.stdout).map_err(|source| {
            ApiExamplesError::InvalidResponse {
                name: name.to_string(),
                source,
            }
        })?;

        let output_path = self.writer.write_output(name, &response)?;

        Ok(EntryResult {
            name: name.to_string(),
            command_path,
            outcome: EntryOutcome::Written(output_path),
        })
    }

    fn echo(&self, command: &str, output: &CommandOutput) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", command)?;
        writeln!(out, "{}", String::from_utf8_lossy(&output.stdout))?;
        Ok(())
    }
}

/// One-line summary printed after a batch
pub fn format_batch_summary(report: &BatchReport, options: &BatchOptions) -> String {
    let mut summary = if options.dry_run {
        format!(
            "{} command(s) written to {}",
            report.dry_run(),
            options.output_dir.display()
        )
    } else {
        format!(
            "{} example(s) processed: {} response(s) written, {} empty, fixtures in {}",
            report.results.len(),
            report.written(),
            report.empty(),
            options.output_dir.display()
        )
    };

    if report.interrupted {
        summary.push_str(" (interrupted)");
    }

    summary
}
