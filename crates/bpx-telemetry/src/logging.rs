//! Structured logging initialization.

use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{TelemetryError, TelemetryResult};
use crate::log_archive::compress_rotated_logs;

/// `[logging]` section of the bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rotated log files (created if missing).
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// File name prefix; files are named `<prefix>.<date>.log`.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_file_prefix() -> String {
    "bot".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
            level: default_level(),
        }
    }
}

/// Initialize console and file logging.
///
/// The console uses JSON output when `RUST_ENV=production` and pretty output
/// otherwise. The file layer writes plain text through a non-blocking writer
/// into a file that rotates daily. Files left over from earlier days are
/// gzipped before the new writer starts.
///
/// # Returns
/// The writer guard. Buffered lines are flushed when it is dropped, so the
/// caller must keep it alive for the life of the process.
pub fn init_logging(config: &LoggingConfig) -> TelemetryResult<WorkerGuard> {
    std::fs::create_dir_all(&config.directory)?;
    compress_rotated_logs(
        &config.directory,
        &config.file_prefix,
        chrono::Utc::now().date_naive(),
    )?;

    let appender = RollingBuilder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_prefix.as_str())
        .filename_suffix("log")
        .build(&config.directory)
        .map_err(|e| TelemetryError::LoggingInit(format!("Failed to create log file: {e}")))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))?;

    let is_production = std::env::var("RUST_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_target(true),
    );

    let result = if is_production {
        // JSON format for production
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        // Pretty format for development
        registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init()
    };
    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    Ok(guard)
}
