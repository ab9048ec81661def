//! Log record format module
//!
//! Supports two encodings:
//! - `text` (human-readable single line)
//! - `json` (one JSON object per line, for CloudWatch Logs Insights)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::LogFormat;

/// Log severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// A single log line before encoding
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub time: DateTime<Utc>,
    pub level: Level,
    /// Invocation this line belongs to, if any
    pub request_id: Option<String>,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogRecord {
    /// Create a new record stamped with the current time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            request_id: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    #[must_use]
    pub fn field(mut self, key: &'static str, value: impl ToString) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Encode the record according to the configured format
    pub fn format(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Text => self.format_text(),
            LogFormat::Json => self.format_json(),
        }
    }

    /// `2026-01-01T00:00:00.000Z INFO [req-1] message key=value`
    fn format_text(&self) -> String {
        let mut line = format!(
            "{} {}",
            self.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level
        );
        if let Some(id) = &self.request_id {
            line.push_str(&format!(" [{id}]"));
        }
        line.push(' ');
        line.push_str(&self.message);
        for (key, value) in &self.fields {
            if needs_quoting(value) {
                line.push_str(&format!(" {key}={value:?}"));
            } else {
                line.push_str(&format!(" {key}={value}"));
            }
        }
        line
    }

    fn format_json(&self) -> String {
        let mut object = Map::new();
        object.insert(
            "time".to_string(),
            Value::String(self.time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        object.insert("level".to_string(), Value::String(self.level.to_string()));
        if let Some(id) = &self.request_id {
            object.insert("request_id".to_string(), Value::String(id.clone()));
        }
        object.insert("message".to_string(), Value::String(self.message.clone()));
        for (key, value) in &self.fields {
            object.insert((*key).to_string(), Value::String(value.clone()));
        }
        Value::Object(object).to_string()
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=')
}
