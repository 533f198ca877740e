//! Prometheus metrics for the volume bot.
//!
//! Counters live in the default registry and are read in-process only.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means two metrics share a
//! name, which is a programming error caught on first use at startup.

use bpx_core::{Side, SkipReason};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, register_int_gauge, Counter,
    CounterVec, Histogram, IntGauge,
};

/// Orders sent to the exchange.
/// Labels: side (Bid/Ask)
pub static ORDERS_SUBMITTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bpx_orders_submitted_total",
        "Total orders submitted",
        &["side"]
    )
    .unwrap()
});

/// Order responses by HTTP status class.
/// Labels: class (2xx/4xx/5xx/other), insufficient_funds (true/false)
pub static ORDER_RESPONSES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bpx_order_responses_total",
        "Total order responses by status class",
        &["class", "insufficient_funds"]
    )
    .unwrap()
});

/// Markets skipped in a pass.
/// Labels: reason (empty_book/no_base_balance/balance_below_minimum)
pub static MARKETS_SKIPPED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bpx_markets_skipped_total",
        "Total markets skipped by reason",
        &["reason"]
    )
    .unwrap()
});

/// Markets whose processing failed in a pass.
pub static MARKET_FAILURES_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "bpx_market_failures_total",
        "Total per-market processing failures"
    )
    .unwrap()
});

/// Quoting side flips.
/// Labels: trigger (timer/insufficient_funds)
pub static SIDE_SWITCHES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bpx_side_switches_total",
        "Total quoting side switches",
        &["trigger"]
    )
    .unwrap()
});

/// Wall time of one polling pass, excluding the inter-pass sleep.
pub static PASS_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "bpx_pass_duration_seconds",
        "Polling pass duration in seconds",
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
    )
    .unwrap()
});

/// Markets selected at startup.
pub static MARKETS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("bpx_markets_active", "Markets selected for quoting").unwrap()
});

/// Metrics helper for convenient recording.
pub struct Metrics;

impl Metrics {
    /// Bucket an HTTP status into its class label.
    pub fn status_class(status: u16) -> &'static str {
        match status {
            200..=299 => "2xx",
            400..=499 => "4xx",
            500..=599 => "5xx",
            _ => "other",
        }
    }

    pub fn markets_selected(count: usize) {
        MARKETS_ACTIVE.set(count as i64);
    }

    pub fn order_submitted(side: Side) {
        ORDERS_SUBMITTED_TOTAL
            .with_label_values(&[side.as_str()])
            .inc();
    }

    pub fn order_response(status: u16, insufficient_funds: bool) {
        let flag = if insufficient_funds { "true" } else { "false" };
        ORDER_RESPONSES_TOTAL
            .with_label_values(&[Self::status_class(status), flag])
            .inc();
    }

    pub fn market_skipped(reason: SkipReason) {
        MARKETS_SKIPPED_TOTAL
            .with_label_values(&[reason.as_str()])
            .inc();
    }

    pub fn market_failed() {
        MARKET_FAILURES_TOTAL.inc();
    }

    /// Record a side flip. `trigger` is the switch trigger label.
    pub fn side_switched(trigger: &str) {
        SIDE_SWITCHES_TOTAL.with_label_values(&[trigger]).inc();
    }

    pub fn pass_completed(duration_secs: f64) {
        PASS_DURATION_SECONDS.observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(Metrics::status_class(200), "2xx");
        assert_eq!(Metrics::status_class(202), "2xx");
        assert_eq!(Metrics::status_class(400), "4xx");
        assert_eq!(Metrics::status_class(503), "5xx");
        assert_eq!(Metrics::status_class(302), "other");
    }

    #[test]
    fn test_side_switch_counter_increments() {
        let before = SIDE_SWITCHES_TOTAL.with_label_values(&["timer"]).get();
        Metrics::side_switched("timer");
        let after = SIDE_SWITCHES_TOTAL.with_label_values(&["timer"]).get();
        assert!(after >= before + 1.0);
    }

    #[test]
    fn test_markets_selected_gauge() {
        Metrics::markets_selected(7);
        assert_eq!(MARKETS_ACTIVE.get(), 7);
    }
}
