//! Curl command generation
//!
//! Renders a catalogue entry as the shell command shown in the API
//! documentation. `${AUTH_TOKEN}` and any `${VAR}` inside the URL or body are
//! left for the shell to expand.

use tera::{Context, Tera};

use crate::catalogue::{RequestBody, RequestDescriptor};
use crate::errors::Result;
use crate::output::formatters::to_compact_string;

/// Command template. The body line is emitted only when a body is present.
const CURL_TEMPLATE: &str = r#"curl -X {{ method }} \
-H "Content-Type: application/json" \
-H "Authorization: Bearer ${AUTH_TOKEN}" \
{% if body %}-d '{{ body }}' \
{% endif %}{{ host }}{{ url }}"#;

/// Render the curl command for `request` against `host`
pub fn render_curl_command(host: &str, request: &RequestDescriptor) -> Result<String> {
    let body = request
        .body
        .as_ref()
        .filter(|b| !b.is_empty())
        .map(encode_body)
        .transpose()?;

    let mut context = Context::new();
    context.insert("method", request.method.http_verb());
    context.insert("host", host);
    context.insert("url", &request.url);
    context.insert("body", &body);

    Ok(Tera::one_off(CURL_TEMPLATE, &context, false)?)
}

/// Text passed to `-d`
pub fn encode_body(body: &RequestBody) -> Result<String> {
    match body {
        RequestBody::Raw(raw) => Ok(raw.clone()),
        RequestBody::Json(value) => to_compact_string(value),
    }
}
