//! Prometheus metrics and structured logging for the volume bot.
//!
//! - Console logging (pretty or JSON) plus a daily-rotated log file
//! - Gzip compression of finished log days
//! - In-process Prometheus counters for orders, skips, failures and switches
//! - One summary line per polling pass

pub mod error;
pub mod log_archive;
pub mod logging;
pub mod metrics;
pub mod pass_summary;

pub use error::{TelemetryError, TelemetryResult};
pub use log_archive::{compress_rotated_logs, LogArchiver};
pub use logging::{init_logging, LoggingConfig};
pub use metrics::Metrics;
pub use pass_summary::PassSummary;
