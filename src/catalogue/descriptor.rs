//! Request descriptors
//!
//! A descriptor is the static record of one example API call: a method, a
//! URL rooted at the API prefix and an optional body.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Spelling of the file-upload pseudo-method used in the catalogue
pub const MULTIPART_SENTINEL: &str = "MULTIPART-POST";

/// HTTP method of a catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    /// File upload, sent as a POST
    MultipartPost,
    /// Anything else, carried verbatim into the rendered command
    Other(String),
}

impl Method {
    /// Parse a catalogue method. Unknown spellings are kept as [`Method::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            MULTIPART_SENTINEL => Method::MultipartPost,
            other => Method::Other(other.to_string()),
        }
    }

    /// The spelling used in the catalogue
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::MultipartPost => MULTIPART_SENTINEL,
            Method::Other(s) => s,
        }
    }

    /// The verb passed to `curl -X`
    pub fn http_verb(&self) -> &str {
        match self {
            Method::MultipartPost => "POST",
            other => other.as_str(),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Method::MultipartPost)
    }

    /// True when the catalogue holds something that is not an HTTP verb
    pub fn is_malformed(&self) -> bool {
        matches!(self, Method::Other(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Method::parse(&s))
    }
}

/// Request body of a catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    /// Pre-formatted body (form-encoded), sent verbatim
    Raw(String),
    /// Structured body, JSON-encoded when rendered
    Json(JsonValue),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Raw(s) => s.is_empty(),
            RequestBody::Json(_) => false,
        }
    }
}

impl From<JsonValue> for RequestBody {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => RequestBody::Raw(s),
            other => RequestBody::Json(other),
        }
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Raw(s.to_string())
    }
}

/// One example API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_standard_verbs() {
        for verb in ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"] {
            let method = Method::parse(verb);
            assert!(!method.is_malformed(), "{} should be a verb", verb);
            assert_eq!(method.as_str(), verb);
            assert_eq!(method.http_verb(), verb);
        }
    }

    #[test]
    fn test_multipart_sentinel() {
        let method = Method::parse("MULTIPART-POST");
        assert_eq!(method, Method::MultipartPost);
        assert!(method.is_multipart());
        assert_eq!(method.as_str(), "MULTIPART-POST");
        assert_eq!(method.http_verb(), "POST");
    }

    #[test]
    fn test_malformed_method_kept_verbatim() {
        let method = Method::parse("-X POST");
        assert!(method.is_malformed());
        assert_eq!(method.http_verb(), "-X POST");
    }

    #[test]
    fn test_lowercase_is_not_a_verb() {
        assert!(Method::parse("get").is_malformed());
    }

    #[test]
    fn test_body_deserialize() {
        let raw: RequestBody = serde_json::from_value(json!("description=patching description")).unwrap();
        assert_eq!(raw, RequestBody::Raw("description=patching description".to_string()));

        let mapping: RequestBody = serde_json::from_value(json!({"role": 10})).unwrap();
        assert_eq!(mapping, RequestBody::Json(json!({"role": 10})));

        let list: RequestBody = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(list, RequestBody::Json(json!([1, 2])));
    }

    #[test]
    fn test_has_body() {
        let get = RequestDescriptor::new(Method::Get, "/api/v1/projects/1");
        assert!(!get.has_body());

        let empty = RequestDescriptor::new(Method::Post, "/api/v1/x").with_body("");
        assert!(!empty.has_body());

        let patch = RequestDescriptor::new(Method::Patch, "/api/v1/memberships/1")
            .with_body(json!({"role": 10}));
        assert!(patch.has_body());
    }

    #[test]
    fn test_descriptor_from_yaml() {
        let yaml = "method: MULTIPART-POST\nurl: /api/v1/userstories/attachments\nbody:\n  object_id: 81\n";
        let desc: RequestDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert!(desc.method.is_multipart());
        assert_eq!(desc.body, Some(RequestBody::Json(json!({"object_id": 81}))));
    }
}
