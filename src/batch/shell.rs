//! Subprocess execution
//!
//! Rendered commands are shell text (line continuations, `${VAR}` tokens,
//! `\&` escapes), so they run through `sh -c` rather than being split into
//! argv by hand.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::{ApiExamplesError, Result};

/// Default shell used to run rendered commands
pub const DEFAULT_SHELL: &str = "sh";

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// True when the command printed nothing at all
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs a rendered command and waits for it to finish
pub trait CommandRunner {
    fn run(&self, command: &str) -> Result<CommandOutput>;
}

/// Runs commands with `<shell> -c <command>`
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        let mut child = Command::new(&self.shell);
        child
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group: a terminal Ctrl+C reaches only us, and the
        // running request is left to finish
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            child.process_group(0);
        }

        let output = child
            .output()
            .map_err(|source| ApiExamplesError::Spawn {
                shell: self.shell.clone(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        };

        debug!(
            code = ?result.code,
            stdout_bytes = result.stdout.len(),
            stderr = %result.stderr_lossy().trim(),
            "Command finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        let mut output = CommandOutput::default();
        assert!(output.is_empty());

        // Whitespace is a response, not silence
        output.stdout = b" \n".to_vec();
        assert!(!output.is_empty());

        output.stdout = b"{}".to_vec();
        assert!(!output.is_empty());
    }

    #[test]
    fn test_success() {
        let output = CommandOutput { code: Some(0), ..Default::default() };
        assert!(output.success());
        assert!(!CommandOutput { code: Some(22), ..Default::default() }.success());
        assert!(!CommandOutput { code: None, ..Default::default() }.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_captures_stdout() {
        let runner = ShellRunner::default();
        let output = runner.run("printf '{\"id\": 1}' \\\n&& echo oops >&2").unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, b"{\"id\": 1}");
        assert_eq!(output.stderr_lossy().trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_exit_code() {
        let output = ShellRunner::default().run("exit 7").unwrap();
        assert_eq!(output.code, Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_expands_environment() {
        let output = ShellRunner::default().run("FOO=bar; echo \"${FOO}\"").unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "bar");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_shell_leads_its_own_process_group() {
        let output = ShellRunner::default().run("cat /proc/$$/stat").unwrap();
        let stat = String::from_utf8_lossy(&output.stdout).into_owned();
        let fields: Vec<_> = stat.split_whitespace().collect();

        // pid (comm) state ppid pgrp ...
        assert_eq!(fields[0], fields[4], "stat: {}", stat);
    }

    #[test]
    fn test_missing_shell() {
        let runner = ShellRunner::new("/nonexistent/shell-for-tests");
        let err = runner.run("true").unwrap_err();
        assert!(matches!(err, ApiExamplesError::Spawn { ref shell, .. } if shell == "/nonexistent/shell-for-tests"));
        assert!(err.to_string().starts_with("Failed to run shell '/nonexistent/shell-for-tests'"));
    }
}
