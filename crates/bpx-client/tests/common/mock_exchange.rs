//! Mock Backpack REST server for integration tests.
//!
//! Serves canned markets, depth and balances, and records every request
//! (headers and JSON body) so tests can check signing.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};

/// One request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    depth: HashMap<String, Value>,
    order_reply: Option<(u16, Value)>,
}

type Shared = Arc<Mutex<Inner>>;

/// A mock exchange bound to an ephemeral local port.
pub struct MockExchange {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    inner: Shared,
}

impl MockExchange {
    /// Start a new mock server on an available port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let inner: Shared = Arc::new(Mutex::new(Inner::default()));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let app = Router::new()
            .route("/api/v1/markets", get(markets))
            .route("/api/v1/depth", get(depth))
            .route("/api/v1/capital", get(capital))
            .route("/api/v1/order", post(order))
            .with_state(inner.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx,
            inner,
        }
    }

    /// Base URL for `BackpackClient::new`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Set the depth returned for `symbol`.
    pub async fn set_depth(&self, symbol: &str, depth: Value) {
        self.inner.lock().await.depth.insert(symbol.to_string(), depth);
    }

    /// Answer every subsequent order with `status` and `body`.
    pub async fn set_order_reply(&self, status: u16, body: Value) {
        self.inner.lock().await.order_reply = Some((status, body));
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn record(state: &Shared, path: &str, headers: &HeaderMap, body: Option<Value>) {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    state.lock().await.requests.push(RecordedRequest {
        path: path.to_string(),
        headers,
        body,
    });
}

async fn markets(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    record(&state, "/api/v1/markets", &headers, None).await;
    Json(json!([
        {
            "symbol": "SOL_USDC",
            "baseSymbol": "SOL",
            "quoteSymbol": "USDC",
            "marketType": "SPOT",
            "filters": {
                "price": {"minPrice": "0.01", "tickSize": "0.01"},
                "quantity": {"minQuantity": "0.01", "stepSize": "0.01"}
            }
        },
        {
            "symbol": "SOL_USDC_PERP",
            "baseSymbol": "SOL",
            "quoteSymbol": "USDC",
            "marketType": "PERP",
            "filters": {"quantity": {"minQuantity": "0.1", "stepSize": "0.1"}}
        },
        {
            "symbol": "ELECTION_YES",
            "baseSymbol": "ELECTION",
            "quoteSymbol": "USDC",
            "marketType": "PREDICTION",
            "filters": {"quantity": {"minQuantity": "1"}}
        }
    ]))
}

async fn depth(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/api/v1/depth", &headers, None).await;
    let symbol = query.get("symbol").cloned().unwrap_or_default();
    match state.lock().await.depth.get(&symbol) {
        Some(depth) => (StatusCode::OK, Json(depth.clone())),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": "INVALID_MARKET", "message": "Market not found"})),
        ),
    }
}

async fn capital(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    record(&state, "/api/v1/capital", &headers, None).await;
    if !headers.contains_key("x-signature") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "UNAUTHORIZED", "message": "Missing signature"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "SOL": {"available": "0.25", "locked": "0", "staked": "0"},
            "USDC": {"available": "120.5", "locked": "3", "staked": "0"}
        })),
    )
}

async fn order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/api/v1/order", &headers, Some(body.clone())).await;
    let reply = state.lock().await.order_reply.clone();
    match reply {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            Json(body),
        ),
        None => (
            StatusCode::OK,
            Json(json!({
                "id": "111",
                "symbol": body["symbol"],
                "side": body["side"],
                "price": body["price"],
                "quantity": body["quantity"],
                "status": "New"
            })),
        ),
    }
}
