//! JSON formatting
//!
//! Request bodies and response fixtures keep the layout the published
//! documentation already uses: `", "` / `": "` separators for inline bodies,
//! sorted keys with a 4-space indent for responses, and ASCII-only output
//! with `\uXXXX` escapes in both.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::errors::Result;

/// Indent used for response fixtures
pub const FIXTURE_INDENT: usize = 4;

/// Serialize a request body on one line
pub fn to_compact_string(value: &JsonValue) -> Result<String> {
    serialize_with(value, InlineFormatter)
}

/// Serialize a response with recursively sorted keys and indentation
pub fn to_sorted_pretty_string(value: &JsonValue) -> Result<String> {
    let sorted = sort_json_keys(value);
    serialize_with(&sorted, PrettyFormatter::with_indent(FIXTURE_INDENT))
}

fn serialize_with<F>(value: &JsonValue, formatter: F) -> Result<String>
where
    F: serde_json::ser::Formatter,
{
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    // Both formatters only ever emit ASCII
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Maximum recursion depth for JSON key sorting to prevent stack overflow
const MAX_JSON_DEPTH: usize = 128;

/// Sort JSON object keys recursively
pub fn sort_json_keys(value: &JsonValue) -> JsonValue {
    sort_json_keys_with_depth(value, 0)
}

fn sort_json_keys_with_depth(value: &JsonValue, depth: usize) -> JsonValue {
    if depth >= MAX_JSON_DEPTH {
        return value.clone();
    }

    match value {
        JsonValue::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));

            let sorted_map: serde_json::Map<String, JsonValue> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_json_keys_with_depth(v, depth + 1)))
                .collect();

            JsonValue::Object(sorted_map)
        }
        JsonValue::Array(arr) => {
            JsonValue::Array(arr.iter().map(|v| sort_json_keys_with_depth(v, depth + 1)).collect())
        }
        _ => value.clone(),
    }
}

/// Write non-ASCII characters as `\uXXXX` (UTF-16 code units, lowercase hex)
fn write_ascii_fragment<W>(writer: &mut W, fragment: &str) -> std::io::Result<()>
where
    W: ?Sized + std::io::Write,
{
    if fragment.is_ascii() {
        return writer.write_all(fragment.as_bytes());
    }

    let mut units = [0u16; 2];
    for c in fragment.chars() {
        if c.is_ascii() {
            writer.write_all(&[c as u8])?;
        } else {
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
        }
    }
    Ok(())
}

/// Single-line formatter with a space after `,` and `:`
struct InlineFormatter;

impl serde_json::ser::Formatter for InlineFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        write_ascii_fragment(writer, fragment)
    }
}

/// Indenting formatter; empty containers stay on one line
struct PrettyFormatter {
    indent: Vec<u8>,
    current_indent: usize,
    has_value: bool,
}

impl PrettyFormatter {
    fn with_indent(spaces: usize) -> Self {
        Self {
            indent: vec![b' '; spaces],
            current_indent: 0,
            has_value: false,
        }
    }
}

impl serde_json::ser::Formatter for PrettyFormatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            write_indent(writer, &self.indent, self.current_indent)?;
        }
        writer.write_all(b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        write_indent(writer, &self.indent, self.current_indent)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            write_indent(writer, &self.indent, self.current_indent)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        write_indent(writer, &self.indent, self.current_indent)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        writer.write_all(b": ")
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        write_ascii_fragment(writer, fragment)
    }
}

fn write_indent<W>(writer: &mut W, indent: &[u8], n: usize) -> std::io::Result<()>
where
    W: ?Sized + std::io::Write,
{
    for _ in 0..n {
        writer.write_all(indent)?;
    }
    Ok(())
}
