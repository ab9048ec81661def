//! Text-message requests

use serde_json::{Map, Value};

use super::extract::render_field;
use crate::error::{json_type_name, HandlerError};
use crate::event::{Body, InvocationContext, RequestEvent};
use crate::logger;
use crate::response::AnalysisResponse;

pub const DEFAULT_MESSAGE: &str = "No message provided";

pub fn handle_json_request(
    event: &RequestEvent,
    ctx: &InvocationContext,
) -> Result<AnalysisResponse, HandlerError> {
    let message = match event.present_body() {
        Some(Body::Text(text)) => {
            let parsed: Value =
                serde_json::from_str(text).map_err(HandlerError::InvalidJsonBody)?;
            message_field(as_object(&parsed)?)
        }
        Some(Body::Structured(value)) => message_field(as_object(value)?),
        // Direct invocation: the event itself is the field mapping
        None => message_field(&event.fields),
    };

    logger::log_extracted(&ctx.request_id, "message", &message, false);

    Ok(AnalysisResponse::ok(
        format!("Received your message: {message}"),
        vec!["No file was uploaded".to_string()],
    ))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, HandlerError> {
    value
        .as_object()
        .ok_or_else(|| HandlerError::BodyNotObject(json_type_name(value)))
}

fn message_field(fields: &Map<String, Value>) -> String {
    fields
        .get("message")
        .map_or_else(|| DEFAULT_MESSAGE.to_string(), render_field)
}
