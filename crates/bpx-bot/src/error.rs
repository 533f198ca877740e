//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Exchange error: {0}")]
    Client(#[from] bpx_client::ClientError),

    #[error("Market error: {0}")]
    Core(#[from] bpx_core::CoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] bpx_telemetry::TelemetryError),
}

pub type AppResult<T> = Result<T, AppError>;
