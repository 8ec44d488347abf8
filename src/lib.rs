//! api-examples library interface
//!
//! Generates the curl examples and JSON response fixtures that document a
//! REST API, by running a catalogue of requests against a live instance.
//!
//! # Module Organization
//!
//! - [`catalogue`] - Request descriptors and the ordered catalogue
//! - [`render`] - Curl command rendering
//! - [`batch`] - Subprocess execution over the catalogue
//! - [`output`] - JSON formatting and fixture files
//! - [`config`] - Config file loading
//! - [`errors`] - Error types (ApiExamplesError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod batch;
pub mod catalogue;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod output;
pub mod render;
pub mod signals;
pub mod status;
