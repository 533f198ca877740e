//! Core domain types for the Backpack volume bot.
//!
//! This crate provides the types shared by every other crate:
//! - `Market`, `MarketType`, `MarketSelector`: market universe and filtering
//! - `DepthSnapshot`, `Balance`: per-pass exchange data
//! - `Price`, `Size`: precision-safe numeric types
//! - `Side`, `OrderType`, `TimeInForce`, `OrderRequest`: order wire types
//! - `MarketOutcome`, `SkipReason`: per-market result of one polling pass

pub mod decimal;
pub mod error;
pub mod execution;
pub mod market;
pub mod order;
pub mod types;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use execution::{
    MarketOutcome, OrderRequest, OrderResponse, QuoteDecision, SkipReason, SubmittedOrder,
    INSUFFICIENT_FUNDS,
};
pub use market::{
    filter_markets, Market, MarketFilters, MarketSelector, MarketType, QuantityFilter,
};
pub use order::{OrderType, Side, TimeInForce};
pub use types::{Balance, Balances, DepthLevel, DepthSnapshot};
