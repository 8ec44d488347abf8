//! Command rendering
//!
//! Turns a catalogue entry into the shell command that documents it:
//!
//! ```text
//! curl -X PATCH \
//! -H "Content-Type: application/json" \
//! -H "Authorization: Bearer ${AUTH_TOKEN}" \
//! -d '{"role": 10}' \
//! http://localhost:8000/api/v1/memberships/1
//! ```

pub mod curl;

pub use curl::{encode_body, render_curl_command};
