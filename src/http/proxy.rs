//! Proxy event construction
//!
//! Wraps a plain HTTP request in the record a Lambda Function URL would
//! deliver: lower-case headers, text bodies as strings, everything else
//! base64-encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hyper::{HeaderMap, Method, Uri};
use serde_json::{json, Map, Value};

/// Whether a body of this content type is delivered as plain text
pub fn is_text_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("text/")
        || essence.ends_with("+json")
        || essence.ends_with("+xml")
        || matches!(
            essence.as_str(),
            "application/json"
                | "application/xml"
                | "application/javascript"
                | "application/x-www-form-urlencoded"
        )
}

/// Header map as a string mapping; repeated headers are joined with `,`
fn headers_to_map(headers: &HeaderMap) -> Map<String, Value> {
    let mut map: Map<String, Value> = Map::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        let joined = match map.get(name.as_str()).and_then(Value::as_str) {
            Some(existing) => format!("{existing},{value}"),
            None => value.to_string(),
        };
        map.insert(name.as_str().to_string(), Value::String(joined));
    }
    map
}

/// Build a proxy-integration event from request parts and the collected body
pub fn build_proxy_event(method: &Method, uri: &Uri, headers: &HeaderMap, body: &[u8]) -> Value {
    let header_map = headers_to_map(headers);
    let content_type = header_map
        .get("content-type")
        .and_then(Value::as_str)
        .unwrap_or("");

    let mut event = json!({
        "rawPath": uri.path(),
        "rawQueryString": uri.query().unwrap_or(""),
        "requestContext": {
            "http": {
                "method": method.as_str(),
                "path": uri.path(),
            }
        },
    });

    if let Some(object) = event.as_object_mut() {
        if !body.is_empty() {
            let text = if is_text_content_type(content_type) {
                std::str::from_utf8(body).ok()
            } else {
                None
            };
            let (encoded, is_base64) = match text {
                Some(text) => (text.to_string(), false),
                None => (STANDARD.encode(body), true),
            };
            object.insert("body".to_string(), Value::String(encoded));
            object.insert("isBase64Encoded".to_string(), Value::Bool(is_base64));
        } else {
            object.insert("isBase64Encoded".to_string(), Value::Bool(false));
        }
        object.insert("headers".to_string(), Value::Object(header_map));
    }

    event
}
