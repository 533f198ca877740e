//! Randomized order quantities.
//!
//! Quantities are drawn uniformly between the market minimum and an upper
//! bound, then rendered at the precision implied by the market's
//! `minQuantity` string so they look like hand-typed sizes.

use bpx_core::{CoreError, Market, SkipReason};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digit count of a minimum-quantity string.
///
/// A fraction made of a single `0` (e.g. `"1.0"`) counts as zero places;
/// any other fraction counts all of its digits (`"0.05"` → 2, `"0.10"` → 2).
pub fn decimal_places(min_quantity: &str) -> u32 {
    match min_quantity.trim().split_once('.') {
        Some((_, "0")) | None => 0,
        Some((_, fraction)) => fraction.len() as u32,
    }
}

/// Inclusive bounds for a quantity draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl QuantityRange {
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Quantity generator for one market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySizer {
    min_quantity: Decimal,
    decimals: u32,
}

impl QuantitySizer {
    /// Build a sizer from the market's quantity filter.
    pub fn for_market(market: &Market) -> bpx_core::Result<Self> {
        Ok(Self {
            min_quantity: market.min_quantity()?,
            decimals: decimal_places(market.min_quantity_str()?),
        })
    }

    /// Build a sizer from a raw `minQuantity` string.
    pub fn from_min_quantity(raw: &str) -> bpx_core::Result<Self> {
        let min_quantity: Decimal = raw.trim().parse()?;
        if min_quantity <= Decimal::ZERO {
            return Err(CoreError::InvalidQuantity(format!(
                "minQuantity must be positive, got {raw}"
            )));
        }
        Ok(Self {
            min_quantity,
            decimals: decimal_places(raw),
        })
    }

    pub fn min_quantity(&self) -> Decimal {
        self.min_quantity
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// `[min, 2 × min]`, used for buys and for perpetual markets.
    pub fn default_range(&self) -> QuantityRange {
        QuantityRange {
            low: self.min_quantity,
            high: self.min_quantity * Decimal::TWO,
        }
    }

    /// `[min, available]`, used for spot sells.
    ///
    /// Skips when there is nothing to sell or not enough to meet the minimum.
    pub fn sell_range(&self, available: Decimal) -> Result<QuantityRange, SkipReason> {
        if available <= Decimal::ZERO {
            return Err(SkipReason::NoBaseBalance);
        }
        if available < self.min_quantity {
            return Err(SkipReason::BalanceBelowMinimum);
        }
        Ok(QuantityRange {
            low: self.min_quantity,
            high: available,
        })
    }

    /// Uniform draw within `range`. The result never leaves the range.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, range: QuantityRange) -> Decimal {
        let low = range.low.to_f64().unwrap_or(0.0);
        let high = range.high.to_f64().unwrap_or(low);
        if high <= low {
            return range.low;
        }
        let sample: f64 = rng.random_range(low..=high);
        Decimal::from_f64(sample)
            .unwrap_or(range.low)
            .clamp(range.low, range.high)
    }

    /// Render a quantity for the order payload.
    ///
    /// Below 1 the value is rounded to `decimals` places with `rounding` and
    /// always printed with exactly that many fractional digits. From 1 upward
    /// the fraction is truncated.
    pub fn format(&self, value: Decimal, rounding: RoundingStrategy) -> String {
        if self.min_quantity < Decimal::ONE {
            let mut rounded = value.round_dp_with_strategy(self.decimals, rounding);
            rounded.rescale(self.decimals);
            rounded.to_string()
        } else {
            let mut whole = value.trunc();
            whole.rescale(0);
            whole.to_string()
        }
    }

    /// Draw and format in one step.
    pub fn random_quantity<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        range: QuantityRange,
        rounding: RoundingStrategy,
    ) -> String {
        let value = self.draw(rng, range);
        self.format(value, rounding)
    }
}
