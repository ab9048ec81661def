//! Best-effort field extraction for uploads
//!
//! Neither extractor parses multipart bodies. Both fall back to a fixed
//! default and report whether they did.

use serde_json::Value;

use crate::event::{Body, RequestEvent};

pub const DEFAULT_FILENAME: &str = "uploaded-file.pdf";
pub const DEFAULT_UPLOAD_MESSAGE: &str = "No message provided with file";

/// An extracted value, or the default used in its place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    Found(T),
    Defaulted(T),
}

impl<T> Extracted<T> {
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }

    pub const fn value(&self) -> &T {
        match self {
            Self::Found(v) | Self::Defaulted(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Found(v) | Self::Defaulted(v) => v,
        }
    }
}

/// Filename from the `content-disposition` header's `filename=` parameter
pub fn extract_filename(event: &RequestEvent) -> Extracted<String> {
    event
        .header("content-disposition")
        .and_then(filename_from_disposition)
        .map_or_else(
            || Extracted::Defaulted(DEFAULT_FILENAME.to_string()),
            Extracted::Found,
        )
}

fn filename_from_disposition(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches(|c| c == '"' || c == '\'').to_string())
}

/// `message` from a body that happens to be a JSON object
pub fn extract_message(event: &RequestEvent) -> Extracted<String> {
    event
        .body
        .as_ref()
        .and_then(Body::as_text)
        .and_then(|text| serde_json::from_str::<Value>(text).ok())
        .and_then(|parsed| parsed.get("message").map(render_field))
        .map_or_else(
            || Extracted::Defaulted(DEFAULT_UPLOAD_MESSAGE.to_string()),
            Extracted::Found,
        )
}

/// Strings verbatim, anything else as compact JSON
pub fn render_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
