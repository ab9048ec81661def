//! Log writer module
//!
//! Provides thread-safe log writing to files or stdout/stderr.
//! Errors and warnings go to the error target, everything else to the info target.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use super::format::{Level, LogRecord};
use crate::config::{LogFormat, LoggingConfig};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
}

/// Thread-safe log writer
pub struct LogWriter {
    format: LogFormat,
    max_level: Level,
    log_events: bool,
    info: LogTarget,
    error: LogTarget,
}

impl LogWriter {
    /// Create a new log writer from logging configuration
    fn new(config: &LoggingConfig) -> io::Result<Self> {
        let max_level = config
            .level
            .parse::<Level>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let info = match config.info_log_file.as_deref() {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };

        let error = match config.error_log_file.as_deref() {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            format: config.format,
            max_level,
            log_events: config.log_events,
            info,
            error,
        })
    }

    /// Whether records at `level` pass the configured filter
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    pub const fn log_events(&self) -> bool {
        self.log_events
    }

    /// Encode and write a record to the target matching its level
    pub fn write(&self, record: &LogRecord) {
        if !self.enabled(record.level) {
            return;
        }
        let line = record.format(self.format);
        match record.level {
            Level::Error | Level::Warn => write_to_target(&self.error, &line),
            Level::Info | Level::Debug => write_to_target(&self.info, &line),
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Write message to log target
fn write_to_target(target: &LogTarget, message: &str) {
    match target {
        LogTarget::Stdout => {
            println!("{message}");
        }
        LogTarget::Stderr => {
            eprintln!("{message}");
        }
        LogTarget::File(file) => {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if log files cannot be opened or the level is unknown.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let writer = LogWriter::new(config)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if `init()` has been called
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
