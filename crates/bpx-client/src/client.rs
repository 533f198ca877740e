//! REST client for the Backpack exchange.
//!
//! Public endpoints (`/api/v1/markets`, `/api/v1/depth`) are plain GETs.
//! Private endpoints (`/api/v1/capital`, `/api/v1/order`) are signed with
//! the configured [`RequestSigner`].

use bpx_core::{Balances, DepthSnapshot, Market, OrderRequest, OrderResponse};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::exchange::Exchange;
use crate::signer::{signing_params, RequestSigner};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production REST base URL.
pub const DEFAULT_API_URL: &str = "https://api.backpack.exchange";

/// Default validity window for signed requests.
pub const DEFAULT_WINDOW_MS: u64 = 5000;

const INSTRUCTION_BALANCE_QUERY: &str = "balanceQuery";
const INSTRUCTION_ORDER_EXECUTE: &str = "orderExecute";

/// Client for the Backpack REST API.
pub struct BackpackClient {
    /// HTTP client.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Signer for private endpoints (None for public-only use).
    signer: Option<RequestSigner>,
    /// `X-Window` value in milliseconds.
    window_ms: u64,
}

impl BackpackClient {
    /// Create a public-only client.
    ///
    /// # Arguments
    /// * `base_url` - REST base URL (e.g., "https://api.backpack.exchange")
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer: None,
            window_ms: DEFAULT_WINDOW_MS,
        })
    }

    /// Attach credentials for private endpoints.
    #[must_use]
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    #[must_use]
    pub fn with_window_ms(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Add the four signature headers to `builder`.
    fn sign_request(
        &self,
        builder: RequestBuilder,
        instruction: &'static str,
        params: &[(String, String)],
    ) -> ClientResult<RequestBuilder> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(ClientError::MissingCredentials(instruction))?;
        let timestamp = chrono::Utc::now().timestamp_millis();
        let signature = signer.sign(instruction, params, timestamp, self.window_ms);

        Ok(builder
            .header("X-API-Key", signer.api_key())
            .header("X-Signature", signature)
            .header("X-Timestamp", timestamp.to_string())
            .header("X-Window", self.window_ms.to_string()))
    }

    async fn send(builder: RequestBuilder) -> ClientResult<Response> {
        builder
            .send()
            .await
            .map_err(|e| ClientError::HttpClient(format!("HTTP request failed: {e}")))
    }

    /// Decode a JSON body, turning non-2xx statuses into `ClientError::Api`.
    async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::HttpClient(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl Exchange for BackpackClient {
    async fn get_markets(&self) -> ClientResult<Vec<Market>> {
        info!(url = %self.base_url, "Fetching markets");
        let response = Self::send(self.client.get(self.url("/api/v1/markets"))).await?;
        Self::read_json(response).await
    }

    async fn get_depth(&self, symbol: &str) -> ClientResult<DepthSnapshot> {
        debug!(symbol, "Fetching depth");
        let request = self
            .client
            .get(self.url("/api/v1/depth"))
            .query(&[("symbol", symbol)]);
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    async fn get_balances(&self) -> ClientResult<Balances> {
        debug!("Fetching balances");
        let request = self.sign_request(
            self.client.get(self.url("/api/v1/capital")),
            INSTRUCTION_BALANCE_QUERY,
            &[],
        )?;
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    async fn execute_order(&self, order: &OrderRequest) -> ClientResult<OrderResponse> {
        let body = serde_json::to_value(order)?;
        let params = signing_params(&body);
        let request = self.sign_request(
            self.client.post(self.url("/api/v1/order")).json(&body),
            INSTRUCTION_ORDER_EXECUTE,
            &params,
        )?;

        let response = Self::send(request).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::HttpClient(format!("Failed to read response: {e}")))?;

        // Rejections such as "Insufficient funds" arrive as JSON error bodies
        // and are handed back for the caller to inspect.
        match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => Ok(OrderResponse::new(status.as_u16(), parsed)),
            Err(_) if status.is_success() => {
                Ok(OrderResponse::new(status.as_u16(), Value::String(text)))
            }
            Err(_) => Err(ClientError::Api {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}
