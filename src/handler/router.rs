//! Request dispatch
//!
//! Picks the upload or text-message handler from the resolved content type.

use super::json::handle_json_request;
use super::multipart::handle_multipart_request;
use crate::error::HandlerError;
use crate::event::{InvocationContext, RequestEvent};
use crate::logger;
use crate::response::AnalysisResponse;

const MULTIPART: &str = "multipart/form-data";

/// Which handler serves a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Multipart,
    Json,
}

/// Case-sensitive substring match on the content type
pub fn route_for(content_type: &str) -> Route {
    if content_type.contains(MULTIPART) {
        Route::Multipart
    } else {
        Route::Json
    }
}

pub fn dispatch(
    event: &RequestEvent,
    ctx: &InvocationContext,
) -> Result<AnalysisResponse, HandlerError> {
    let content_type = event.content_type();
    logger::log_content_type(&ctx.request_id, content_type);

    match route_for(content_type) {
        Route::Multipart => handle_multipart_request(event, ctx),
        Route::Json => handle_json_request(event, ctx),
    }
}
