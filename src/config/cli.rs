use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the Arcadia binary.
#[derive(Debug, Parser)]
#[command(name = "arcadia", version, about = "Arcadia gaming portal server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "ARCADIA_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the Arcadia HTTP service.
    Serve(Box<ServeArgs>),
    /// Load every content document and report which ones fall back to defaults.
    #[command(name = "check-data")]
    CheckData(CheckDataArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct DataOverride {
    /// Override the directory holding the JSON content documents.
    #[arg(long = "data-directory", value_name = "PATH")]
    pub data_directory: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CheckDataArgs {
    #[command(flatten)]
    pub data: DataOverride,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub data: DataOverride,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the uploads directory checked by the health endpoint.
    #[arg(long = "uploads-directory", value_name = "PATH")]
    pub uploads_directory: Option<PathBuf>,

    /// Override the document cache time-to-live in milliseconds.
    #[arg(long = "cache-ttl-ms", value_name = "MILLIS")]
    pub cache_ttl_ms: Option<u64>,

    /// Enable or disable the administrative API.
    #[arg(
        long = "admin-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub admin_enabled: Option<bool>,
}
