//! Exchange abstraction used by the polling loop.

use bpx_core::{Balances, DepthSnapshot, Market, OrderRequest, OrderResponse};

use crate::error::ClientResult;

/// Operations the bot performs against an exchange.
///
/// The loop is single-threaded, so futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Exchange {
    /// All listed markets.
    async fn get_markets(&self) -> ClientResult<Vec<Market>>;

    /// Order book depth for one market.
    async fn get_depth(&self, symbol: &str) -> ClientResult<DepthSnapshot>;

    /// Account balances keyed by token.
    async fn get_balances(&self) -> ClientResult<Balances>;

    /// Submit an order. Exchange-side rejections that carry a JSON body come
    /// back as `Ok` so the caller can inspect the message.
    async fn execute_order(&self, order: &OrderRequest) -> ClientResult<OrderResponse>;
}
