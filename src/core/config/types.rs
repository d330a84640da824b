use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Inventory registration service.
// `-h` is taken by `--host`, so help is long-form only.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "inventory-rust",
    about = "Inventory registration HTTP service",
    disable_help_flag = true,
    arg = clap::Arg::new("help")
        .long("help")
        .help("Print help")
        .action(clap::ArgAction::Help)
)]
pub(crate) struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(short = 'h', long = "host", required = true)]
    pub(crate) host: String,

    /// Port to bind the HTTP listener to.
    #[arg(short = 'p', long = "port", required = true)]
    pub(crate) port: String,

    /// Directory for uploaded photos; created if missing.
    #[arg(short = 'c', long = "cache", required = true)]
    pub(crate) cache: PathBuf,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(super) server: ServerSettings,
    pub(super) storage: StorageSettings,
    pub(super) cors: CorsSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ServerSettings {
    pub(super) host: ServerHost,
    pub(super) port: ServerPort,
}

#[derive(Debug, Clone)]
pub(crate) struct StorageSettings {
    pub(crate) cache_dir: PathBuf,
    pub(crate) max_upload_size_mb: u64,
    pub(crate) report_photo_mime: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct CorsSettings {
    pub(crate) origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ServerHost(pub(super) String);

#[derive(Debug, Clone, Copy)]
pub(crate) struct ServerPort(pub(super) u16);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid server host: {0}")]
    InvalidHost(String),
    #[error("invalid server port: {0}")]
    InvalidPort(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("invalid cors origins: {0}")]
    InvalidCors(String),
    #[error("cache directory must not be empty")]
    EmptyCacheDir,
}
