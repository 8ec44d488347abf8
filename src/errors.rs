//! Error types for api-examples

use thiserror::Error;

/// Main error type for api-examples
#[derive(Error, Debug)]
pub enum ApiExamplesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid filter: {0}")]
    Regex(#[from] regex::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Failed to run shell '{shell}': {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command for '{name}' failed ({}){}", exit_code_label(.code), stderr_suffix(.stderr))]
    CommandFailed {
        name: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Response for '{name}' is not valid JSON: {source}")]
    InvalidResponse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

pub type Result<T> = std::result::Result<T, ApiExamplesError>;
