//! In-memory exchange for driving the application loop.
//!
//! Markets, depth and balances are canned. Orders are recorded and answered
//! from a reply queue (HTTP 200 once the queue is empty). A `None` entry in
//! the queue fails that submission at the transport level.

use bpx_client::{ClientError, ClientResult, Exchange};
use bpx_core::{
    Balance, Balances, DepthLevel, DepthSnapshot, Market, MarketFilters, MarketType,
    OrderRequest, OrderResponse, Price, QuantityFilter, Size,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};

pub fn market(symbol: &str, market_type: MarketType, min_quantity: &str) -> Market {
    let base = symbol.split('_').next().unwrap_or(symbol).to_string();
    Market {
        symbol: symbol.to_string(),
        base_symbol: base,
        quote_symbol: "USDC".to_string(),
        market_type,
        filters: MarketFilters {
            quantity: Some(QuantityFilter {
                min_quantity: min_quantity.to_string(),
            }),
        },
    }
}

/// Book with the given bid and ask prices (size 1 each).
pub fn book(bids: &[Decimal], asks: &[Decimal]) -> DepthSnapshot {
    let level = |p: &Decimal| DepthLevel::new(Price::new(*p), Size::new(Decimal::ONE));
    DepthSnapshot::new(bids.iter().map(level).collect(), asks.iter().map(level).collect())
}

pub fn insufficient_funds() -> OrderResponse {
    OrderResponse::new(
        400,
        json!({"code": "INSUFFICIENT_FUNDS", "message": "Insufficient funds"}),
    )
}

#[derive(Default)]
pub struct FakeExchange {
    markets: Vec<Market>,
    depth: HashMap<String, DepthSnapshot>,
    failing_depth: HashSet<String>,
    fail_listing: bool,
    balances: Balances,
    order_replies: RefCell<VecDeque<Option<OrderResponse>>>,
    orders: RefCell<Vec<OrderRequest>>,
    depth_calls: RefCell<Vec<String>>,
    balance_calls: Cell<usize>,
}

impl FakeExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market(mut self, market: Market, depth: DepthSnapshot) -> Self {
        self.depth.insert(market.symbol.clone(), depth);
        self.markets.push(market);
        self
    }

    /// A listed market whose depth request fails.
    pub fn with_failing_market(mut self, market: Market) -> Self {
        self.failing_depth.insert(market.symbol.clone());
        self.markets.push(market);
        self
    }

    pub fn with_balance(mut self, token: &str, available: Decimal) -> Self {
        self.balances.insert(
            token.to_string(),
            Balance {
                available,
                ..Default::default()
            },
        );
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn queue_reply(&self, response: OrderResponse) {
        self.order_replies.borrow_mut().push_back(Some(response));
    }

    /// Next submission fails before the exchange answers.
    pub fn queue_transport_error(&self) {
        self.order_replies.borrow_mut().push_back(None);
    }

    pub fn orders(&self) -> Vec<OrderRequest> {
        self.orders.borrow().clone()
    }

    pub fn depth_calls(&self) -> Vec<String> {
        self.depth_calls.borrow().clone()
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.get()
    }
}

impl Exchange for FakeExchange {
    async fn get_markets(&self) -> ClientResult<Vec<Market>> {
        if self.fail_listing {
            return Err(ClientError::HttpClient("connection refused".to_string()));
        }
        Ok(self.markets.clone())
    }

    async fn get_depth(&self, symbol: &str) -> ClientResult<DepthSnapshot> {
        self.depth_calls.borrow_mut().push(symbol.to_string());
        if self.failing_depth.contains(symbol) {
            return Err(ClientError::Api {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        self.depth.get(symbol).cloned().ok_or(ClientError::Api {
            status: 400,
            body: "unknown market".to_string(),
        })
    }

    async fn get_balances(&self) -> ClientResult<Balances> {
        self.balance_calls.set(self.balance_calls.get() + 1);
        Ok(self.balances.clone())
    }

    async fn execute_order(&self, order: &OrderRequest) -> ClientResult<OrderResponse> {
        self.orders.borrow_mut().push(order.clone());
        match self.order_replies.borrow_mut().pop_front() {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(ClientError::HttpClient("connection reset".to_string())),
            None => Ok(OrderResponse::new(200, json!({"id": "1", "status": "New"}))),
        }
    }
}
