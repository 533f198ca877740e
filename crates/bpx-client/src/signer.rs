//! Request signing for Backpack private endpoints.
//!
//! Signed requests carry an ED25519 signature over a query-string style
//! payload:
//!
//! ```text
//! instruction=<name>&<k1=v1&k2=v2 sorted by key>&timestamp=<ms>&window=<ms>
//! ```
//!
//! The signature is sent base64-encoded in `X-Signature` together with
//! `X-API-Key`, `X-Timestamp` and `X-Window`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::{Signer as _, SigningKey, SECRET_KEY_LENGTH};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Payload
// =============================================================================

/// Flatten a JSON object body into sorted `(key, value)` pairs for signing.
///
/// Booleans render as `true`/`false` and strings without quotes. Nested
/// values and nulls are skipped; order bodies never contain them.
pub fn signing_params(body: &Value) -> Vec<(String, String)> {
    let Some(object) = body.as_object() else {
        return Vec::new();
    };

    let mut params: Vec<(String, String)> = object
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((key.clone(), rendered))
        })
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

// =============================================================================
// RequestSigner
// =============================================================================

/// API key plus the ED25519 key derived from the secret.
///
/// The secret is decoded into zeroizing buffers and never logged.
pub struct RequestSigner {
    api_key: String,
    signing_key: SigningKey,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Build a signer from base64 credentials and verify they belong together.
    ///
    /// # Arguments
    /// * `api_key` - Base64 ED25519 public key
    /// * `secret_key` - Base64 32-byte ED25519 seed
    ///
    /// # Errors
    /// Returns `ClientError` if:
    /// - The secret is not base64 or not 32 bytes
    /// - The public key derived from the secret differs from `api_key`
    pub fn from_base64(api_key: &str, secret_key: &str) -> ClientResult<Self> {
        let decoded = Zeroizing::new(
            STANDARD
                .decode(secret_key.trim())
                .map_err(|e| ClientError::InvalidKey(format!("secret key is not base64: {e}")))?,
        );
        if decoded.len() != SECRET_KEY_LENGTH {
            return Err(ClientError::InvalidKey(format!(
                "secret key must decode to {SECRET_KEY_LENGTH} bytes, got {}",
                decoded.len()
            )));
        }

        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        seed.copy_from_slice(decoded.as_slice());
        let signing_key = SigningKey::from_bytes(&seed);

        let derived = STANDARD.encode(signing_key.verifying_key().to_bytes());
        let configured = api_key.trim();
        if derived != configured {
            return Err(ClientError::KeyMismatch {
                configured: configured.to_string(),
                derived,
            });
        }

        Ok(Self {
            api_key: derived,
            signing_key,
        })
    }

    /// Base64 public key sent as `X-API-Key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Build the string that gets signed.
    pub fn signing_payload(
        instruction: &str,
        params: &[(String, String)],
        timestamp_ms: i64,
        window_ms: u64,
    ) -> String {
        let mut payload = format!("instruction={instruction}");
        for (key, value) in params {
            payload.push('&');
            payload.push_str(key);
            payload.push('=');
            payload.push_str(value);
        }
        payload.push_str(&format!("&timestamp={timestamp_ms}&window={window_ms}"));
        payload
    }

    /// Sign a request and return the base64 signature.
    ///
    /// `params` must already be sorted by key (see [`signing_params`]).
    pub fn sign(
        &self,
        instruction: &str,
        params: &[(String, String)],
        timestamp_ms: i64,
        window_ms: u64,
    ) -> String {
        let payload = Self::signing_payload(instruction, params, timestamp_ms, window_ms);
        let signature = self.signing_key.sign(payload.as_bytes());
        STANDARD.encode(signature.to_bytes())
    }
}
