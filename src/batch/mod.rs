//! Example generation batch
//!
//! One synchronous pass over the catalogue. Each command runs to completion
//! before the next one is rendered; there is no retry and no timeout.

pub mod runner;
pub mod shell;

pub use runner::{
    format_batch_summary, BatchOptions, BatchReport, BatchRunner, EntryOutcome, EntryResult,
    DEFAULT_HOST, DEFAULT_OUTPUT_DIR,
};
pub use shell::{CommandOutput, CommandRunner, ShellRunner, DEFAULT_SHELL};

use crate::catalogue::Catalogue;
use crate::errors::Result;
use crate::status::ExitStatus;

/// Run the whole catalogue through the shell and report on stderr
pub fn run_batch(catalogue: &Catalogue, options: BatchOptions, shell: &str) -> Result<ExitStatus> {
    eprintln!("Generating API examples against {}", options.host);
    eprintln!("  Examples: {}", catalogue.len());
    eprintln!("  Output directory: {}", options.output_dir.display());
    if options.dry_run {
        eprintln!("  Mode: DRY RUN (commands are written, not executed)");
    }
    eprintln!();

    let runner = BatchRunner::new(options, ShellRunner::new(shell));
    let report = runner.run(catalogue)?;

    eprintln!("{}", format_batch_summary(&report, runner.options()));

    if report.interrupted {
        Ok(ExitStatus::Interrupted)
    } else {
        Ok(ExitStatus::Success)
    }
}
