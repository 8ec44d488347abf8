//! Fixture writer
//!
//! Every catalogue entry produces `<name>-cmd.adoc` and, when the server
//! answered with a body, `<name>-output.adoc` in the output directory.

use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::errors::Result;
use crate::fs::sanitize_filename;
use crate::output::formatters::to_sorted_pretty_string;

/// Suffix of command fixtures
pub const COMMAND_SUFFIX: &str = "-cmd.adoc";

/// Suffix of response fixtures
pub const OUTPUT_SUFFIX: &str = "-output.adoc";

/// Writes fixtures into a single directory
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    dir: PathBuf,
}

impl FixtureWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn command_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", sanitize_filename(name), COMMAND_SUFFIX))
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", sanitize_filename(name), OUTPUT_SUFFIX))
    }

    /// Write the rendered command for `name`
    pub fn write_command(&self, name: &str, command: &str) -> Result<PathBuf> {
        let path = self.command_path(name);
        self.write(&path, command)?;
        Ok(path)
    }

    /// Write the response for `name` with sorted keys
    pub fn write_output(&self, name: &str, response: &JsonValue) -> Result<PathBuf> {
        let path = self.output_path(name);
        let formatted = to_sorted_pretty_string(response)?;
        self.write(&path, &formatted)?;
        Ok(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "Fixture written");
        Ok(())
    }
}
