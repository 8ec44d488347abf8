//! Output handling (JSON formatting, fixture files)

pub mod formatters;
pub mod writer;

pub use formatters::{to_compact_string, to_sorted_pretty_string};
pub use writer::{FixtureWriter, COMMAND_SUFFIX, OUTPUT_SUFFIX};
