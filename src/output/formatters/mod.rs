//! Output formatters

pub mod json;

pub use json::{sort_json_keys, to_compact_string, to_sorted_pretty_string};
