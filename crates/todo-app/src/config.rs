//! Process configuration
//!
//! Flags fall back to environment variables (a `.env` file is loaded first),
//! then to the defaults below.

use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use todo_adapter::controller::http::HttpSettings;

use crate::server::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable, for local development
    Pretty,
}

/// Where todos are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Postgres { url: String },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo HTTP service")]
#[command(version)]
pub struct AppConfig {
    /// Host to bind
    #[arg(long, env = "PROJECT_HOST", default_value = "localhost")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PROJECT_PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection string; todos stay in memory when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Name attached to every request log as `component`
    #[arg(long, env = "SERVICE_NAME", default_value = "todo-service")]
    pub service_name: String,

    /// Don't install any log output
    #[arg(long, env = "DISABLE_LOGGING", value_parser = BoolishValueParser::new())]
    pub disable_logging: bool,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// How long in-flight requests may run after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

impl AppConfig {
    pub fn storage_backend(&self) -> StorageBackend {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StorageBackend::Postgres {
                url: url.to_string(),
            },
            _ => StorageBackend::InMemory,
        }
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings::new(&self.service_name, self.server_config().socket_addr())
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(&self.host, self.port)
            .with_shutdown_timeout(Duration::from_secs(self.shutdown_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("todo-server").chain(args.iter().copied()))
            .unwrap()
    }

    #[rstest]
    fn test_flags_override_everything() {
        let config = parse(&[
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--database-url",
            "postgres://todo@db/todo",
            "--service-name",
            "todo-api",
            "--log-format",
            "pretty",
            "--shutdown-timeout-secs",
            "3",
            "--disable-logging",
        ]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.service_name, "todo-api");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.disable_logging);
        assert_eq!(
            config.storage_backend(),
            StorageBackend::Postgres {
                url: "postgres://todo@db/todo".to_string()
            }
        );
        assert_eq!(config.server_config().shutdown_timeout(), Duration::from_secs(3));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_missing_database_url_means_memory(#[case] url: Option<&str>) {
        let mut config = parse(&[]);
        config.database_url = url.map(str::to_string);

        assert_eq!(config.storage_backend(), StorageBackend::InMemory);
    }

    #[rstest]
    fn test_http_settings_advertise_bind_address() {
        let config = parse(&["--host", "127.0.0.1", "--port", "8181", "--service-name", "todos"]);

        let settings = config.http_settings();

        assert_eq!(settings.service_name(), "todos");
        assert_eq!(settings.advertised_addr(), "127.0.0.1:8181");
    }

    #[rstest]
    fn test_rejects_invalid_port() {
        let result = AppConfig::try_parse_from(["todo-server", "--port", "http"]);
        assert!(result.is_err());
    }
}
