// Error types
// Every handler failure collapses to one response shape at the entry point

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// The event could not be decoded into a request record
    #[error("malformed event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    #[error("invalid JSON body: {0}")]
    InvalidJsonBody(#[source] serde_json::Error),

    /// The body parsed, but is not a field mapping
    #[error("request body must be a JSON object, got {0}")]
    BodyNotObject(&'static str),

    #[error("base64-encoded body must be a string, got {0}")]
    EncodedBodyNotText(&'static str),

    #[error("invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Local server failures that end a request before the handler runs
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

/// JSON type name for error messages
pub const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
