//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid API key: {0}")]
    InvalidKey(String),

    #[error("Public key mismatch: configured {configured}, derived {derived}")]
    KeyMismatch { configured: String, derived: String },

    #[error("Credentials required for {0}")]
    MissingCredentials(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
