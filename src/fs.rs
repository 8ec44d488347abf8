//! Filesystem utilities

use sanitize_filename::Options as SanitizeOptions;

/// Sanitize a catalogue entry name for use as a fixture file stem
///
/// Path separators and characters invalid on Windows become `_`.
pub fn sanitize_filename(name: &str) -> String {
    sanitize_filename::sanitize_with_options(name, SanitizeOptions {
        replacement: "_",
        windows: true,
        truncate: true,
    })
}
