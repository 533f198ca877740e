//! Bid/Ask side switching for single-sided quoting.
//!
//! The switcher starts on `Bid` and has no terminal state. It flips:
//! - on a timer, checked once per pass via [`SideSwitcher::on_tick`]
//! - immediately, when an order is rejected with "Insufficient funds"
//!
//! A reactive flip can land mid-pass, so later markets in the same pass may
//! be quoted on the opposite side from earlier ones.

use bpx_core::{OrderResponse, Side};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// What caused a side flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchTrigger {
    Timer,
    InsufficientFunds,
}

impl SwitchTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::InsufficientFunds => "insufficient_funds",
        }
    }
}

impl fmt::Display for SwitchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current quoting side plus the instant of the last flip.
#[derive(Debug, Clone)]
pub struct SideSwitcher {
    side: Side,
    last_switch: Instant,
    interval: Duration,
}

impl SideSwitcher {
    /// Start on `Bid` with the timer anchored at `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            side: Side::Bid,
            last_switch: now,
            interval,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn last_switch(&self) -> Instant {
        self.last_switch
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Timer transition. Returns the new side if the interval has elapsed.
    pub fn on_tick(&mut self, now: Instant) -> Option<Side> {
        if now.saturating_duration_since(self.last_switch) >= self.interval {
            Some(self.flip(now, SwitchTrigger::Timer))
        } else {
            None
        }
    }

    /// Reactive transition. Returns the new side if `response` reports
    /// insufficient funds; every other response is ignored.
    pub fn on_order_response(&mut self, response: &OrderResponse, now: Instant) -> Option<Side> {
        if response.is_insufficient_funds() {
            Some(self.flip(now, SwitchTrigger::InsufficientFunds))
        } else {
            None
        }
    }

    fn flip(&mut self, now: Instant, trigger: SwitchTrigger) -> Side {
        let from = self.side;
        self.side = from.opposite();
        self.last_switch = now;
        info!(from = %from, to = %self.side, trigger = %trigger, "Switched quoting side");
        self.side
    }
}
