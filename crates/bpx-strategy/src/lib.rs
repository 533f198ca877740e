//! Quoting policy for the Backpack volume bot.
//!
//! Pure, exchange-free logic:
//! - Reference price selection from a depth snapshot
//! - Randomized order quantities at the market's precision
//! - Bid/Ask side switching on a timer or on insufficient funds
//!
//! # Architecture
//!
//! ```text
//! DepthSnapshot ─→ ReferencePrices ─┐
//! Market filter ─→ QuantitySizer ───┼─→ plan_quotes() ─→ Vec<QuoteDecision>
//! SideSwitcher (side_switch mode) ──┘
//! ```

pub mod config;
pub mod quote_engine;
pub mod side_switch;
pub mod sizing;

pub use config::{QuotingMode, StrategyConfig};
pub use quote_engine::{plan_quotes, QuotePlan, ReferencePrices, SidePlan};
pub use side_switch::{SideSwitcher, SwitchTrigger};
pub use sizing::{decimal_places, QuantityRange, QuantitySizer};
