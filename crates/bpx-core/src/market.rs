//! Market definitions and market-type filtering.
//!
//! `Market` deserializes directly from the exchange's `/api/v1/markets`
//! entries. Only the fields the bot needs are modeled; everything else in the
//! payload is ignored.

use crate::error::{CoreError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange market type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketType {
    Spot,
    Perp,
    /// Any other listing (prediction, dated futures, ...). Never traded.
    #[serde(other)]
    Other,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "SPOT"),
            Self::Perp => write!(f, "PERP"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

/// Configured market-type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketSelector {
    Spot,
    Perp,
    /// Spot and perpetual markets.
    #[default]
    Both,
}

impl MarketSelector {
    /// Check whether a market type passes this selector.
    pub fn matches(&self, market_type: MarketType) -> bool {
        match self {
            Self::Spot => market_type == MarketType::Spot,
            Self::Perp => market_type == MarketType::Perp,
            Self::Both => matches!(market_type, MarketType::Spot | MarketType::Perp),
        }
    }
}

impl fmt::Display for MarketSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "SPOT"),
            Self::Perp => write!(f, "PERP"),
            Self::Both => write!(f, "BOTH"),
        }
    }
}

/// Quantity filter of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityFilter {
    /// Minimum order quantity as sent by the exchange (e.g. "0.01").
    /// Kept as text: its fractional digits drive quantity formatting.
    pub min_quantity: String,
}

/// Market filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketFilters {
    #[serde(default)]
    pub quantity: Option<QuantityFilter>,
}

/// A tradable market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market symbol (e.g. "SOL_USDC", "SOL_USDC_PERP").
    pub symbol: String,
    #[serde(default)]
    pub base_symbol: String,
    #[serde(default)]
    pub quote_symbol: String,
    pub market_type: MarketType,
    #[serde(default)]
    pub filters: MarketFilters,
}

impl Market {
    /// Whether this is a perpetual futures market.
    pub fn is_perp(&self) -> bool {
        self.market_type == MarketType::Perp
    }

    /// Token that an ask order on this market sells.
    ///
    /// Falls back to the left side of the symbol when the exchange did not
    /// send `baseSymbol`.
    pub fn base_token(&self) -> &str {
        if !self.base_symbol.is_empty() {
            return &self.base_symbol;
        }
        self.symbol.split('_').next().unwrap_or(&self.symbol)
    }

    /// Raw minimum quantity string.
    pub fn min_quantity_str(&self) -> Result<&str> {
        self.filters
            .quantity
            .as_ref()
            .map(|q| q.min_quantity.as_str())
            .ok_or_else(|| CoreError::InvalidMarket(format!("{}: missing quantity filter", self.symbol)))
    }

    /// Parsed minimum quantity.
    pub fn min_quantity(&self) -> Result<Decimal> {
        let raw = self.min_quantity_str()?;
        let value: Decimal = raw.trim().parse()?;
        if value <= Decimal::ZERO {
            return Err(CoreError::InvalidQuantity(format!(
                "{}: minQuantity must be positive, got {raw}",
                self.symbol
            )));
        }
        Ok(value)
    }
}

/// Keep only the markets accepted by `selector`, preserving exchange order.
pub fn filter_markets(markets: Vec<Market>, selector: MarketSelector) -> Vec<Market> {
    markets
        .into_iter()
        .filter(|m| selector.matches(m.market_type))
        .collect()
}
