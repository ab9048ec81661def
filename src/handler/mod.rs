//! Request handler module
//!
//! Classifies an inbound event as a file upload or a text message, extracts
//! the filename and message, and answers with a canned acknowledgment.
//! [`handle_event`] is the single entry point and the only place a failure
//! is turned into a response.

pub mod extract;
pub mod json;
pub mod multipart;
pub mod router;

use serde_json::Value;

use crate::error::HandlerError;
use crate::event::{InvocationContext, RequestEvent};
use crate::logger;
use crate::response::AnalysisResponse;

/// Handle one event; never fails
pub fn handle_event(event: Value, ctx: &InvocationContext) -> AnalysisResponse {
    logger::log_event_received(&ctx.request_id, &event);

    match process(event, ctx) {
        Ok(response) => response,
        Err(err) => {
            logger::log_handler_error(&ctx.request_id, &err);
            AnalysisResponse::error(err.to_string())
        }
    }
}

fn process(event: Value, ctx: &InvocationContext) -> Result<AnalysisResponse, HandlerError> {
    let event = RequestEvent::from_value(event).map_err(HandlerError::MalformedEvent)?;
    router::dispatch(&event, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> InvocationContext {
        InvocationContext::new("test-request")
    }

    #[test]
    fn test_json_message() {
        let response = handle_event(
            json!({
                "headers": {"content-type": "application/json"},
                "body": "{\"message\": \"hi\"}"
            }),
            &ctx(),
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "OK",
                "analysis": {
                    "summary": "Received your message: hi",
                    "keyFindings": ["No file was uploaded"]
                }
            })
        );
    }

    #[test]
    fn test_no_content_type() {
        let response = handle_event(json!({"body": "{\"message\": \"hi\"}"}), &ctx());
        assert_eq!(
            response.analysis().unwrap().summary,
            "Received your message: hi"
        );
    }

    #[test]
    fn test_missing_message() {
        let response = handle_event(
            json!({"headers": {"content-type": "application/json"}, "body": "{}"}),
            &ctx(),
        );
        assert_eq!(
            response.analysis().unwrap().summary,
            "Received your message: No message provided"
        );
    }

    #[test]
    fn test_multipart_upload() {
        let response = handle_event(
            json!({
                "headers": {
                    "content-type": "multipart/form-data; boundary=X",
                    "content-disposition": "form-data; name=\"file\"; filename=\"report.pdf\""
                },
                "body": "LS1YLS0=",
                "isBase64Encoded": true
            }),
            &ctx(),
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "OK",
                "analysis": {
                    "summary": "Received file: report.pdf",
                    "keyFindings": [
                        "Uploaded file: report.pdf",
                        "Message: No message provided with file"
                    ]
                }
            })
        );
    }

    #[test]
    fn test_invalid_json_is_error_response() {
        let response = handle_event(
            json!({"headers": {"content-type": "text/plain"}, "body": "hello there"}),
            &ctx(),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["message"], "Error");
        assert!(value.get("analysis").is_none());
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid JSON body: "));
    }

    #[test]
    fn test_numeric_header_value_still_handled() {
        let response = handle_event(
            json!({"headers": {"x-n": 1}, "body": "{\"message\":\"hi\"}"}),
            &ctx(),
        );
        assert_eq!(
            response.analysis().unwrap().summary,
            "Received your message: hi"
        );
    }

    #[test]
    fn test_malformed_event_is_error_response() {
        let response = handle_event(json!(["not", "an", "event"]), &ctx());
        assert!(response
            .error_description()
            .unwrap()
            .starts_with("malformed event: "));
    }

    #[test]
    fn test_idempotent() {
        let event = json!({
            "headers": {
                "Content-Type": "application/json",
                "content-type": "multipart/form-data"
            },
            "body": "{\"message\": \"again\"}"
        });
        let first = handle_event(event.clone(), &ctx()).to_json();
        let second = handle_event(event, &InvocationContext::new("other-request")).to_json();
        assert_eq!(first, second);
        assert!(first.contains("Message: again"));
    }
}
