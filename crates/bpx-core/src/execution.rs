//! Execution-related types.
//!
//! This module provides types for:
//! - Quote decisions computed per market per pass
//! - Order requests and raw exchange responses
//! - Per-market pass outcomes and skip reasons

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::order::{OrderType, Side, TimeInForce};
use crate::Price;

/// Exchange message that marks an order rejected for lack of balance.
pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds";

// ============================================================================
// Quote / Order Types
// ============================================================================

/// What to quote on one side of one market in the current pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDecision {
    pub side: Side,
    pub price: Price,
    /// Quantity already formatted to the market's precision.
    pub quantity: String,
}

impl QuoteDecision {
    #[must_use]
    pub fn new(side: Side, price: Price, quantity: impl Into<String>) -> Self {
        Self {
            side,
            price,
            quantity: quantity.into(),
        }
    }
}

/// Order submission payload (`POST /api/v1/order` body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    pub price: Price,
    pub quantity: String,
    pub auto_lend_redeem: bool,
}

impl OrderRequest {
    /// Limit GTC order with auto lend/redeem enabled.
    #[must_use]
    pub fn limit_gtc(symbol: impl Into<String>, quote: &QuoteDecision) -> Self {
        Self {
            symbol: symbol.into(),
            side: quote.side,
            order_type: OrderType::Limit,
            time_in_force: TimeInForce::GoodTilCancelled,
            price: quote.price,
            quantity: quote.quantity.clone(),
            auto_lend_redeem: true,
        }
    }
}

/// Raw exchange response to an order submission.
///
/// The body is kept verbatim for logging. Only `message` is ever inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl OrderResponse {
    #[must_use]
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// `message` field of the body, if any.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|m| m.as_str())
    }

    /// Whether the exchange refused the order for lack of funds.
    pub fn is_insufficient_funds(&self) -> bool {
        self.message() == Some(INSUFFICIENT_FUNDS)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Display for OrderResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Reason for skipping a market in the current pass (not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Bids or asks were empty.
    EmptyBook,
    /// Ask side on a spot market with no base-token balance.
    NoBaseBalance,
    /// Base-token balance is non-zero but below the market minimum.
    BalanceBelowMinimum,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyBook => "empty_book",
            Self::NoBaseBalance => "no_base_balance",
            Self::BalanceBelowMinimum => "balance_below_minimum",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order that reached the exchange, with its response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedOrder {
    pub quote: QuoteDecision,
    pub response: OrderResponse,
}

/// Result of processing one market in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketOutcome {
    /// One or more orders were submitted.
    Submitted { orders: Vec<SubmittedOrder> },
    /// Market intentionally skipped this pass.
    Skipped { reason: SkipReason },
    /// Fetching, sizing or submission failed.
    ///
    /// `orders` holds the legs that reached the exchange before the failure.
    Failed {
        error: String,
        orders: Vec<SubmittedOrder>,
    },
}

impl MarketOutcome {
    #[must_use]
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    #[must_use]
    pub fn failed(error: impl fmt::Display) -> Self {
        Self::failed_after(error, Vec::new())
    }

    /// Failure after some orders were already submitted.
    #[must_use]
    pub fn failed_after(error: impl fmt::Display, orders: Vec<SubmittedOrder>) -> Self {
        Self::Failed {
            error: error.to_string(),
            orders,
        }
    }

    /// Orders that reached the exchange, whatever the outcome.
    pub fn orders(&self) -> &[SubmittedOrder] {
        match self {
            Self::Submitted { orders } | Self::Failed { orders, .. } => orders,
            Self::Skipped { .. } => &[],
        }
    }

    /// Number of orders submitted.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders().len()
    }
}
