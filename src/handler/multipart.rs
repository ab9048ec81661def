//! File-upload requests
//!
//! The body is never split into parts; filename and message come from the
//! best-effort extractors.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use super::extract::{extract_filename, extract_message};
use crate::error::{json_type_name, HandlerError};
use crate::event::{Body, InvocationContext, RequestEvent};
use crate::logger;
use crate::response::AnalysisResponse;

/// Standard alphabet, tolerant of non-zero trailing bits
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode the way proxy integrations are usually read: bytes outside the
/// alphabet (line wraps, stray whitespace) are skipped before decoding
fn decode_lenient(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let filtered: Vec<u8> = encoded
        .bytes()
        .filter(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();
    LENIENT.decode(filtered)
}

pub fn handle_multipart_request(
    event: &RequestEvent,
    ctx: &InvocationContext,
) -> Result<AnalysisResponse, HandlerError> {
    if event.is_base64_encoded() {
        match event.present_body() {
            Some(Body::Text(encoded)) => {
                // Validated only; extraction reads headers and the raw body
                let decoded = decode_lenient(encoded)?;
                logger::log_decoded_body(&ctx.request_id, decoded.len());
            }
            Some(Body::Structured(value)) => {
                return Err(HandlerError::EncodedBodyNotText(json_type_name(value)));
            }
            None => {}
        }
    }

    let filename = extract_filename(event);
    let message = extract_message(event);

    logger::log_extracted(
        &ctx.request_id,
        "filename",
        filename.value(),
        filename.is_defaulted(),
    );
    logger::log_extracted(
        &ctx.request_id,
        "message",
        message.value(),
        message.is_defaulted(),
    );

    let filename = filename.into_inner();
    let message = message.into_inner();

    Ok(AnalysisResponse::ok(
        format!("Received file: {filename}"),
        vec![
            format!("Uploaded file: {filename}"),
            format!("Message: {message}"),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::{json, Value};

    fn run(value: Value) -> Result<AnalysisResponse, HandlerError> {
        let event = RequestEvent::from_value(value).unwrap();
        handle_multipart_request(&event, &InvocationContext::new("test"))
    }

    #[test]
    fn test_filename_from_disposition() {
        let response = run(json!({
            "headers": {
                "content-type": "multipart/form-data; boundary=X",
                "content-disposition": "form-data; name=\"file\"; filename=\"report.pdf\""
            }
        }))
        .unwrap();
        let analysis = response.analysis().unwrap();
        assert_eq!(analysis.summary, "Received file: report.pdf");
        assert_eq!(
            analysis.key_findings,
            vec![
                "Uploaded file: report.pdf".to_string(),
                "Message: No message provided with file".to_string()
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let response = run(json!({
            "headers": {"content-type": "multipart/form-data; boundary=X"},
            "body": "--X\r\nContent-Disposition: form-data; name=\"file\"\r\n\r\ndata\r\n--X--",
            "isBase64Encoded": false
        }))
        .unwrap();
        assert_eq!(
            response.analysis().unwrap().summary,
            "Received file: uploaded-file.pdf"
        );
    }

    #[test]
    fn test_message_from_raw_body() {
        let response = run(json!({
            "headers": {"content-type": "multipart/form-data"},
            "body": "{\"message\": \"note\"}"
        }))
        .unwrap();
        assert_eq!(
            response.analysis().unwrap().key_findings[1],
            "Message: note"
        );
    }

    #[test]
    fn test_base64_body_accepted() {
        let encoded = STANDARD.encode(b"--X\r\n\r\nbinary\r\n--X--");
        let response = run(json!({
            "headers": {"content-type": "multipart/form-data; boundary=X"},
            "body": encoded,
            "isBase64Encoded": true
        }))
        .unwrap();
        // Decoded bytes do not feed extraction
        assert_eq!(
            response.analysis().unwrap().key_findings[1],
            "Message: No message provided with file"
        );
    }

    #[test]
    fn test_invalid_base64() {
        let err = run(json!({
            "headers": {"content-type": "multipart/form-data"},
            "body": "not base64!!",
            "isBase64Encoded": true
        }))
        .unwrap_err();
        assert!(matches!(err, HandlerError::InvalidBase64(_)));
    }

    #[test]
    fn test_line_wrapped_base64_accepted() {
        let response = run(json!({
            "headers": {"content-type": "multipart/form-data"},
            "body": "TWFu\r\nTWFu",
            "isBase64Encoded": true
        }))
        .unwrap();
        assert!(response.analysis().is_some());
        assert_eq!(decode_lenient("TWFu\r\nTWFu").unwrap(), b"ManMan");
    }

    #[test]
    fn test_trailing_bits_accepted() {
        let response = run(json!({
            "headers": {"content-type": "multipart/form-data"},
            "body": "TWF=",
            "isBase64Encoded": true
        }))
        .unwrap();
        assert!(response.analysis().is_some());
        assert_eq!(decode_lenient("TWF=").unwrap(), b"Ma");
    }

    #[test]
    fn test_missing_padding_rejected() {
        assert!(decode_lenient("TWE").is_err());
    }

    #[test]
    fn test_encoded_structured_body_rejected() {
        let err = run(json!({
            "headers": {"content-type": "multipart/form-data"},
            "body": {"file": "not text"},
            "isBase64Encoded": true
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "base64-encoded body must be a string, got object"
        );
    }
}
