//! Application configuration.

use crate::error::{AppError, AppResult};
use bpx_client::{DEFAULT_API_URL, DEFAULT_WINDOW_MS};
use bpx_core::MarketSelector;
use bpx_strategy::StrategyConfig;
use bpx_telemetry::LoggingConfig;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Environment variable overriding `credentials.public_key`.
pub const ENV_API_KEY: &str = "BPX_API_KEY";
/// Environment variable overriding `credentials.secret_key`.
pub const ENV_API_SECRET: &str = "BPX_API_SECRET";

/// API credentials (base64 ED25519 keys).
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub secret_key: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// REST base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Market types to quote (SPOT, PERP or BOTH).
    #[serde(default)]
    pub market_type: MarketSelector,
    /// Sleep between polling passes.
    #[serde(default = "default_order_interval_secs")]
    pub order_interval_secs: u64,
    /// Validity window sent with signed requests.
    #[serde(default = "default_request_window_ms")]
    pub request_window_ms: u64,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_order_interval_secs() -> u64 {
    10
}

fn default_request_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            market_type: MarketSelector::default(),
            order_interval_secs: default_order_interval_secs(),
            request_window_ms: default_request_window_ms(),
            credentials: CredentialsConfig::default(),
            strategy: StrategyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load, apply environment overrides and validate.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the file cannot be read or parsed, or
    /// when the resulting configuration is invalid.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_credential_overrides(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_API_SECRET).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Parse without overrides or validation.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Replace credentials with non-empty override values.
    pub fn apply_credential_overrides(
        &mut self,
        public_key: Option<String>,
        secret_key: Option<String>,
    ) {
        if let Some(key) = public_key.filter(|k| !k.trim().is_empty()) {
            self.credentials.public_key = key;
        }
        if let Some(secret) = secret_key.filter(|s| !s.trim().is_empty()) {
            self.credentials.secret_key = secret;
        }
    }

    /// Check intervals and credentials.
    pub fn validate(&self) -> AppResult<()> {
        if self.order_interval_secs == 0 {
            return Err(AppError::Config(
                "order_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.strategy.side_switch_interval_secs == 0 {
            return Err(AppError::Config(
                "strategy.side_switch_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.request_window_ms == 0 {
            return Err(AppError::Config(
                "request_window_ms must be greater than zero".to_string(),
            ));
        }
        if self.credentials.public_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "credentials.public_key is missing (or set {ENV_API_KEY})"
            )));
        }
        if self.credentials.secret_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "credentials.secret_key is missing (or set {ENV_API_SECRET})"
            )));
        }
        Ok(())
    }

    pub fn order_interval(&self) -> Duration {
        Duration::from_secs(self.order_interval_secs)
    }
}
