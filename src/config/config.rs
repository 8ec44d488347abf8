//! Config file handling

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{ApiExamplesError, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "API_EXAMPLES_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "api-examples.toml";

/// api-examples configuration
///
/// Every field is optional; command-line flags override it and built-in
/// defaults fill the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Base URL of the running application
    pub host: Option<String>,
    /// Fixture directory
    pub output_dir: Option<PathBuf>,
    /// Shell used to run commands
    pub shell: Option<String>,
    /// External catalogue file
    pub catalogue: Option<PathBuf>,
    /// File the configuration was read from
    pub source: Option<PathBuf>,
}

impl Config {
    /// Locate and load the configuration.
    ///
    /// An explicit path (flag or environment variable) must exist; the
    /// implicit locations are skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load_file(Path::new(&path));
            }
        }

        for candidate in Self::default_locations() {
            if candidate.is_file() {
                return Self::load_file(&candidate);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiExamplesError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut config = Self::from_toml_str(&content, base_dir)?;
        config.source = Some(path.to_path_buf());

        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Parse configuration text. Relative paths resolve against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ApiExamplesError::Config(format!("Invalid config TOML: {}", e)))?;

        let section = match toml_value.get("generator") {
            Some(section) => section,
            None => return Ok(Self::default()),
        };

        let host = Self::get_string(section, "host")?;
        let shell = Self::get_string(section, "shell")?;
        let output_dir = Self::get_string(section, "output_dir")?.map(|p| Self::resolve(base_dir, &p));
        let catalogue = Self::get_string(section, "catalogue")?.map(|p| Self::resolve(base_dir, &p));

        Ok(Self {
            host,
            output_dir,
            shell,
            catalogue,
            source: None,
        })
    }

    fn get_string(section: &toml::Value, key: &str) -> Result<Option<String>> {
        match section.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ApiExamplesError::Config(format!(
                "generator.{} must be a string, found {}",
                key,
                other.type_str()
            ))),
        }
    }

    fn resolve(base_dir: &Path, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            base_dir.join(path)
        }
    }

    /// Implicit config locations, in lookup order
    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("api-examples").join("config.toml"));
        }
        locations
    }
}
