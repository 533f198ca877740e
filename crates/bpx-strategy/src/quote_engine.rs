//! Quote price selection and per-market quote planning.
//!
//! Prices come from the level at index `len / 2` of each book side rather
//! than the top of book, which keeps quotes inside the book without pricing
//! at the touch. A bid is priced off the ask side and an ask off the bid side.

use bpx_core::{DepthSnapshot, Market, Price, QuoteDecision, Side, SkipReason};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::sizing::QuantitySizer;

/// Reference prices picked from one depth snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePrices {
    /// Price of `bids[bids.len() / 2]`.
    pub bid: Price,
    /// Price of `asks[asks.len() / 2]`.
    pub ask: Price,
}

impl ReferencePrices {
    /// Returns `None` when either side of the book is empty.
    pub fn from_depth(depth: &DepthSnapshot) -> Option<Self> {
        let bid = depth.bids.get(depth.bids.len() / 2)?.price();
        let ask = depth.asks.get(depth.asks.len() / 2)?.price();
        Some(Self { bid, ask })
    }

    /// Limit price for an order on `side`.
    pub fn order_price(&self, side: Side) -> Price {
        match side {
            Side::Bid => self.ask,
            Side::Ask => self.bid,
        }
    }
}

/// Which sides to quote for a market this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidePlan {
    Both,
    Single(Side),
}

/// Outcome of planning one market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotePlan {
    Quote(Vec<QuoteDecision>),
    Skip(SkipReason),
}

/// Compute the orders to place on `market` for this pass.
///
/// # Arguments
/// * `depth` - Fresh depth snapshot for the market
/// * `sides` - `Both` for dual-side quoting, `Single` for side switching
/// * `base_available` - Available base-token balance; only read for an ask
///   on a spot market, where it caps the quantity
/// * `rng` - Source of the quantity draw
///
/// # Errors
/// Returns `CoreError` when the market's quantity filter is missing or invalid.
pub fn plan_quotes<R: Rng + ?Sized>(
    market: &Market,
    depth: &DepthSnapshot,
    sides: SidePlan,
    base_available: Option<Decimal>,
    rng: &mut R,
) -> bpx_core::Result<QuotePlan> {
    let Some(prices) = ReferencePrices::from_depth(depth) else {
        return Ok(QuotePlan::Skip(SkipReason::EmptyBook));
    };

    let sizer = QuantitySizer::for_market(market)?;

    match sides {
        SidePlan::Both => {
            // One draw shared by both legs.
            let quantity = sizer.random_quantity(
                rng,
                sizer.default_range(),
                RoundingStrategy::MidpointAwayFromZero,
            );
            Ok(QuotePlan::Quote(vec![
                QuoteDecision::new(Side::Bid, prices.order_price(Side::Bid), quantity.clone()),
                QuoteDecision::new(Side::Ask, prices.order_price(Side::Ask), quantity),
            ]))
        }
        SidePlan::Single(side) => {
            let spot_sell = side == Side::Ask && !market.is_perp();
            let (range, rounding) = if spot_sell {
                let available = base_available.unwrap_or(Decimal::ZERO);
                match sizer.sell_range(available) {
                    // Never round above what the account holds.
                    Ok(range) => (range, RoundingStrategy::ToZero),
                    Err(reason) => return Ok(QuotePlan::Skip(reason)),
                }
            } else {
                (
                    sizer.default_range(),
                    RoundingStrategy::MidpointAwayFromZero,
                )
            };

            let quantity = sizer.random_quantity(rng, range, rounding);
            Ok(QuotePlan::Quote(vec![QuoteDecision::new(
                side,
                prices.order_price(side),
                quantity,
            )]))
        }
    }
}
