//! Backpack exchange market-making volume bot.
//!
//! Main application that ties the components together:
//! - Market discovery and market-type filtering at startup
//! - A fixed-interval polling loop over every selected market
//! - Quote planning (dual-side or side-switching) and order submission
//! - Per-pass outcome accounting and metrics

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, CredentialsConfig};
pub use error::{AppError, AppResult};
