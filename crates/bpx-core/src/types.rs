//! Market data and account types fetched fresh on every pass.

use crate::{Price, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One order-book level: `[price, quantity]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel(pub Price, pub Size);

impl DepthLevel {
    pub fn new(price: Price, quantity: Size) -> Self {
        Self(price, quantity)
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.0
    }

    #[inline]
    pub fn quantity(&self) -> Size {
        self.1
    }
}

/// Order book snapshot for one market.
///
/// Levels are kept in the order the exchange sent them. Nothing here checks
/// that they are sorted or that the book is not crossed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    #[serde(default)]
    pub bids: Vec<DepthLevel>,
    #[serde(default)]
    pub asks: Vec<DepthLevel>,
}

impl DepthSnapshot {
    pub fn new(bids: Vec<DepthLevel>, asks: Vec<DepthLevel>) -> Self {
        Self { bids, asks }
    }

    /// True when either side has no levels.
    pub fn is_one_sided(&self) -> bool {
        self.bids.is_empty() || self.asks.is_empty()
    }
}

/// Balance of one token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub available: Decimal,
    #[serde(default)]
    pub locked: Decimal,
    #[serde(default)]
    pub staked: Decimal,
}

/// Balances keyed by token symbol.
pub type Balances = HashMap<String, Balance>;
