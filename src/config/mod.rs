// Configuration module entry point
// Layers a config file, ECHO_* environment variables and built-in defaults

mod types;

use std::net::SocketAddr;

pub use types::{Config, HttpConfig, LogFormat, LoggingConfig, RunMode};

/// Environment variable naming the config file (without extension)
pub const CONFIG_PATH_ENV: &str = "ECHO_CONFIG";

/// Set by the Lambda execution environment
const LAMBDA_RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

impl Config {
    /// Load configuration from the path in `ECHO_CONFIG`, or `config` when unset
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error: environment and defaults still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("ECHO")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("runtime.mode", "auto")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.log_events", true)?
            .set_default("http.server_name", "analysis-echo")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 6_291_456)? // Lambda sync payload limit
            .set_default("http.health_path", "/healthz")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve `auto` against the process environment
    pub fn resolved_mode(&self) -> RunMode {
        resolve_mode(
            self.runtime.mode,
            std::env::var_os(LAMBDA_RUNTIME_API_ENV).is_some(),
        )
    }
}

const fn resolve_mode(mode: RunMode, in_lambda: bool) -> RunMode {
    match mode {
        RunMode::Auto if in_lambda => RunMode::Lambda,
        RunMode::Auto => RunMode::Local,
        explicit => explicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("analysis-echo-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.toml"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(cfg.runtime.mode, RunMode::Auto);
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(cfg.logging.log_events);
        assert_eq!(cfg.http.max_body_size, 6_291_456);
        assert_eq!(cfg.http.health_path, "/healthz");
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_config(
            "override",
            r#"
[runtime]
mode = "local"
workers = 2

[server]
port = 9100

[logging]
format = "json"
log_events = false

[http]
enable_cors = false
"#,
        );
        let stem = path.with_extension("");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(cfg.runtime.mode, RunMode::Local);
        assert_eq!(cfg.runtime.workers, Some(2));
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert!(!cfg.logging.log_events);
        assert!(!cfg.http.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_resolve_mode() {
        assert_eq!(resolve_mode(RunMode::Auto, true), RunMode::Lambda);
        assert_eq!(resolve_mode(RunMode::Auto, false), RunMode::Local);
        assert_eq!(resolve_mode(RunMode::Local, true), RunMode::Local);
        assert_eq!(resolve_mode(RunMode::Lambda, false), RunMode::Lambda);
    }
}
