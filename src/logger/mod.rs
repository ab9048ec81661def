//! Logger module
//!
//! Provides logging utilities for the handler and the local server including:
//! - Startup logging for both invocation surfaces
//! - Per-invocation diagnostics tagged with the request id
//! - Error logging with the full source chain
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{Level, LogRecord};

use crate::config::{Config, LoggingConfig};
use serde_json::Value;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(config)
}

/// Route a record through the global writer, or plain stdout/stderr before init
fn emit(record: &LogRecord) {
    if let Some(writer) = writer::get() {
        writer.write(record);
        return;
    }
    if record.level > Level::Info {
        return;
    }
    let line = record.format(crate::config::LogFormat::Text);
    match record.level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

fn write_info(message: &str) {
    emit(&LogRecord::new(Level::Info, message));
}

pub fn log_error(message: &str) {
    emit(&LogRecord::new(Level::Error, message));
}

pub fn log_warning(message: &str) {
    emit(&LogRecord::new(Level::Warn, message));
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Local invocation server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.runtime.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.info_log_file {
        write_info(&format!("Info log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info(&format!("Max body size: {} bytes", config.http.max_body_size));
    write_info(&format!("CORS enabled: {}", config.http.enable_cors));
    write_info("======================================");
}

pub fn log_lambda_start(config: &Config) {
    emit(
        &LogRecord::new(Level::Info, "Lambda runtime loop starting")
            .field("log_level", &config.logging.level)
            .field("log_events", config.logging.log_events),
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    emit(&LogRecord::new(Level::Debug, "Connection accepted").field("peer", peer_addr));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_request(method: &hyper::Method, path: &str, status: u16) {
    emit(
        &LogRecord::new(Level::Info, "Local request served")
            .field("method", method)
            .field("path", path)
            .field("status", status),
    );
}

pub fn log_shutdown() {
    write_info("Shutdown requested, no longer accepting connections");
}

/// Dump the inbound event, unless disabled by `logging.log_events`
pub fn log_event_received(request_id: &str, event: &Value) {
    if writer::get().is_some_and(|w| !w.log_events()) {
        return;
    }
    emit(
        &LogRecord::new(Level::Info, "Received event")
            .request_id(request_id)
            .field("event", event),
    );
}

pub fn log_content_type(request_id: &str, content_type: &str) {
    emit(
        &LogRecord::new(Level::Info, "Resolved content type")
            .request_id(request_id)
            .field("content_type", content_type),
    );
}

/// Log an extracted field and whether the default was used
pub fn log_extracted(request_id: &str, name: &'static str, value: &str, defaulted: bool) {
    emit(
        &LogRecord::new(Level::Info, format!("Received {name}"))
            .request_id(request_id)
            .field(name, value)
            .field("defaulted", defaulted),
    );
}

pub fn log_decoded_body(request_id: &str, len: usize) {
    emit(
        &LogRecord::new(Level::Debug, "Decoded base64 body")
            .request_id(request_id)
            .field("bytes", len),
    );
}

/// Log a handler failure with every error in its source chain
pub fn log_handler_error(request_id: &str, err: &(dyn std::error::Error + 'static)) {
    let mut chain = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    let mut record = LogRecord::new(Level::Error, "Error processing request")
        .request_id(request_id)
        .field("error", err);
    if !chain.is_empty() {
        record = record.field("caused_by", chain.join(": "));
    }
    emit(&record);
}
