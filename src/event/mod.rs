//! Inbound event model
//!
//! Two shapes reach the handler: the proxy-integration record
//! (`headers`/`body`/`isBase64Encoded`) and a direct invocation where the
//! event itself carries the fields. Both decode into [`RequestEvent`].

mod context;

pub use context::InvocationContext;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request event as supplied by the invoking platform
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestEvent {
    /// Header values that are not strings are kept but never matched
    #[serde(default)]
    pub headers: Option<Map<String, Value>>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(default, rename = "isBase64Encoded")]
    pub is_base64_encoded: Option<bool>,
    /// Every other top-level key, used as the field mapping on direct invocation
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Request body: raw text from a proxy integration, or an already-parsed value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Structured(Value),
}

impl Body {
    /// Whether the body carries anything; empty strings and empty collections do not
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Structured(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Structured(_) => None,
        }
    }
}

impl RequestEvent {
    /// Decode an event from its JSON form
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The body, if present and non-empty
    pub fn present_body(&self) -> Option<&Body> {
        self.body.as_ref().filter(|b| b.is_present())
    }

    pub fn is_base64_encoded(&self) -> bool {
        self.is_base64_encoded.unwrap_or(false)
    }

    /// Case-sensitive header lookup; only string values are returned
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()?.get(name).and_then(Value::as_str)
    }

    /// Resolve the content type, preferring `content-type` over `Content-Type`
    ///
    /// Returns an empty string when neither key is present.
    pub fn content_type(&self) -> &str {
        self.header("content-type")
            .or_else(|| self.header("Content-Type"))
            .unwrap_or("")
    }
}
