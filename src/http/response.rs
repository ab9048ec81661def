//! HTTP response building module
//!
//! Builders for the local server's responses. Every response carries the
//! `Server` header and, when enabled, the CORS headers a browser frontend needs.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Content-Disposition, Authorization";

/// Status line, `Server` header and optional CORS headers
fn base_builder(status: StatusCode, http: &HttpConfig) -> Builder {
    let mut builder = Response::builder()
        .status(status)
        .header("Server", http.server_name.as_str());

    if http.enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", ALLOWED_HEADERS);
    }
    builder
}

/// Build 200 response carrying the handler's JSON
pub fn build_json_response(json: String, http: &HttpConfig) -> Response<Full<Bytes>> {
    base_builder(StatusCode::OK, http)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    base_builder(StatusCode::NO_CONTENT, http)
        .header("Allow", ALLOWED_METHODS)
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build health check response
pub fn build_health_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    plain_response(StatusCode::OK, "ok", http)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    let mut response =
        plain_response(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed", http);
    response.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static(ALLOWED_METHODS),
    );
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    plain_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large", http)
}

/// Build 400 Bad Request response
pub fn build_400_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    plain_response(StatusCode::BAD_REQUEST, "400 Bad Request", http)
}

fn plain_response(
    status: StatusCode,
    text: &'static str,
    http: &HttpConfig,
) -> Response<Full<Bytes>> {
    base_builder(status, http)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "analysis-echo".to_string(),
            enable_cors,
            max_body_size: 1024,
            health_path: "/healthz".to_string(),
        }
    }

    #[test]
    fn test_json_response_headers() {
        let response = build_json_response("{}".to_string(), &http_config(true));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(response.headers()["Server"], "analysis-echo");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn test_cors_disabled() {
        let response = build_options_response(&http_config(false));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
        assert_eq!(response.headers()["Allow"], ALLOWED_METHODS);
    }

    #[test]
    fn test_405_has_allow() {
        let response = build_405_response(&http_config(false));
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["Allow"], ALLOWED_METHODS);
    }
}
