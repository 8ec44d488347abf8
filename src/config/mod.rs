//! Configuration

#[allow(clippy::module_inception)]
mod config;

pub use config::{Config, CONFIG_ENV_VAR, LOCAL_CONFIG_FILE};
