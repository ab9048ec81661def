//! Local request entry point
//!
//! Method validation, body size limits, then the request is wrapped as a
//! proxy event and handed to the same entry point Lambda uses.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use super::proxy::build_proxy_event;
use super::response;
use crate::config::HttpConfig;
use crate::error::ServerError;
use crate::event::InvocationContext;
use crate::handler;
use crate::logger;
use crate::server::AppState;

pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let http = &state.config.http;
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match method {
        Method::OPTIONS => response::build_options_response(http),
        Method::GET if path == http.health_path => response::build_health_response(http),
        Method::POST => invoke(req, http).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            response::build_405_response(http)
        }
    };

    logger::log_request(&method, &path, response.status().as_u16());
    Ok(response)
}

async fn invoke<B>(req: Request<B>, http: &HttpConfig) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    if let Some(resp) = check_body_size(&req, http) {
        return resp;
    }

    let (parts, body) = req.into_parts();
    let bytes = match read_body(body, http.max_body_size).await {
        Ok(bytes) => bytes,
        Err(err @ ServerError::PayloadTooLarge { .. }) => {
            logger::log_error(&err.to_string());
            return response::build_413_response(http);
        }
        Err(err) => {
            logger::log_error(&err.to_string());
            return response::build_400_response(http);
        }
    };

    let event = build_proxy_event(&parts.method, &parts.uri, &parts.headers, &bytes);
    let ctx = InvocationContext::local();
    let result = handler::handle_event(event, &ctx);
    response::build_json_response(result.to_json(), http)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, http: &HttpConfig) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > http.max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {})",
                    http.max_body_size
                ));
                Some(response::build_413_response(http))
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Collect the body, stopping at `limit` bytes
async fn read_body<B>(body: B, limit: u64) -> Result<Bytes, ServerError>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let max = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, max).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ServerError::PayloadTooLarge { limit })
        }
        Err(err) => Err(ServerError::BodyRead(err.to_string())),
    }
}
