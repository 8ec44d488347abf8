//! Common test utilities for api-examples integration tests
//!
//! Every invocation runs the built binary inside its own temporary working
//! directory, with config lookup pointed away from the real user config.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    Interrupted = 130,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            130 => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    /// Check if stdout contains a substring
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

/// Isolated working directory for one CLI run
pub struct Workspace {
    pub dir: TempDir,
    pub env_vars: HashMap<String, String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp workspace"),
            env_vars: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Set an environment variable for the child process
    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Write a file relative to the workspace and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Read a file relative to the workspace
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path().join(name).exists()
    }

    /// Number of files in a workspace directory
    pub fn count_files(&self, dir: &str) -> usize {
        std::fs::read_dir(self.path().join(dir))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Install an executable script on the child's PATH (Unix only)
    #[cfg(unix)]
    pub fn install_script(&mut self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.path().join("bin");
        let path = bin.join(name);
        std::fs::create_dir_all(&bin).expect("Failed to create bin dir");
        std::fs::write(&path, script).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");

        let system_path = std::env::var("PATH").unwrap_or_default();
        let new_path = format!("{}:{}", bin.display(), system_path);
        self.set_env("PATH", &new_path);
    }
}

/// Run the CLI with the given arguments in a fresh workspace
pub fn api_examples(args: &[&str]) -> CliResponse {
    api_examples_in(&Workspace::new(), args)
}

/// Run the CLI with the given arguments inside `workspace`
pub fn api_examples_in(workspace: &Workspace, args: &[&str]) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_api-examples"));
    cmd.args(args);
    cmd.current_dir(workspace.path());

    // Keep the user's own configuration out of the run
    cmd.env_remove("API_EXAMPLES_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd.env("XDG_CONFIG_HOME", workspace.path().join(".config"));
    cmd.env("HOME", workspace.path());
    for (key, value) in &workspace.env_vars {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().expect("Failed to execute command");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);

    CliResponse {
        stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

/// A small catalogue used across integration tests
pub const SAMPLE_CATALOGUE: &str = r#"
- name: projects-get
  method: GET
  url: /api/v1/projects/1

- name: projects-delete
  method: DELETE
  url: /api/v1/projects/1

- name: memberships-create
  method: POST
  url: /api/v1/memberships
  body:
    project: 3
    role: 12

- name: memberships-create
  method: POST
  url: /api/v1/memberships
  body:
    project: 3
    role: 12
    email: test@test.com

- name: attachments-create
  method: MULTIPART-POST
  url: /api/v1/userstories/attachments
  body:
    object_id: 81
    attached_file: "@/tmp/test.png"
"#;
