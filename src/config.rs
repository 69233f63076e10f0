use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Environment prefix for settings, e.g. `NOTES_SERVER__PORT=8080`.
const ENV_PREFIX: &str = "NOTES";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Notes file used by the file store
    #[arg(long, env = "NOTES_FILE")]
    pub data_file: Option<String>,

    /// Storage provider: "file" or "memory"
    #[arg(long)]
    pub storage_provider: Option<String>,

    /// Log output format: "compact" or "json"
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests running longer than this are answered with 408.
    ///
    /// The handler is dropped wherever it is when the timeout fires. A write
    /// whose save already completed stays persisted even though the client
    /// sees 408, so clients retrying a timed-out create may duplicate it.
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    /// Notes file for the file provider.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Priority: CLI flag > CLI env alias > `NOTES_` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("server.body_limit_bytes", 1024 * 1024)?
            .set_default("storage.provider", "file")?
            .set_default("storage.path", "notes.json")?
            .set_default("telemetry.format", "compact")?;

        // An explicit file must exist; ./config.* is picked up if present.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(path) = cli.data_file {
            builder = builder.set_override("storage.path", path)?;
        }
        if let Some(provider) = cli.storage_provider {
            builder = builder.set_override("storage.provider", provider)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("telemetry.format", format)?;
        }

        builder.build()?.try_deserialize()
    }
}
