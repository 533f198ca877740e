//! Per-pass statistics.
//!
//! Each polling pass accumulates its market outcomes here. Recording an
//! outcome also feeds the Prometheus counters, and `finish` logs one summary
//! line and observes the pass duration.

use bpx_core::{MarketOutcome, SkipReason};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

use crate::metrics::Metrics;

/// Counts for one polling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub pass: u64,
    pub markets: usize,
    pub orders_submitted: usize,
    pub insufficient_funds: usize,
    pub skipped: BTreeMap<&'static str, usize>,
    pub failed: usize,
}

impl PassSummary {
    pub fn new(pass: u64) -> Self {
        Self {
            pass,
            ..Default::default()
        }
    }

    /// Count one market outcome and update metrics.
    pub fn record(&mut self, outcome: &MarketOutcome) {
        self.markets += 1;
        for order in outcome.orders() {
            let insufficient = order.response.is_insufficient_funds();
            Metrics::order_submitted(order.quote.side);
            Metrics::order_response(order.response.status, insufficient);
            self.orders_submitted += 1;
            if insufficient {
                self.insufficient_funds += 1;
            }
        }

        match outcome {
            MarketOutcome::Submitted { .. } => {}
            MarketOutcome::Skipped { reason } => {
                Metrics::market_skipped(*reason);
                *self.skipped.entry(reason.as_str()).or_default() += 1;
            }
            MarketOutcome::Failed { .. } => {
                Metrics::market_failed();
                self.failed += 1;
            }
        }
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(reason.as_str()).copied().unwrap_or(0)
    }

    /// Log the summary line and record the pass duration.
    pub fn finish(&self, elapsed: Duration) {
        Metrics::pass_completed(elapsed.as_secs_f64());
        info!(
            pass = self.pass,
            markets = self.markets,
            orders = self.orders_submitted,
            insufficient_funds = self.insufficient_funds,
            skipped = self.skipped_total(),
            failed = self.failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "Pass complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_core::{OrderResponse, Price, QuoteDecision, Side, SubmittedOrder};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn submitted(side: Side, status: u16, body: serde_json::Value) -> SubmittedOrder {
        SubmittedOrder {
            quote: QuoteDecision::new(side, Price::new(dec!(10)), "0.5"),
            response: OrderResponse::new(status, body),
        }
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut summary = PassSummary::new(3);

        summary.record(&MarketOutcome::Submitted {
            orders: vec![
                submitted(Side::Bid, 200, json!({"id": "1"})),
                submitted(
                    Side::Ask,
                    400,
                    json!({"code": "INSUFFICIENT_FUNDS", "message": "Insufficient funds"}),
                ),
            ],
        });
        summary.record(&MarketOutcome::skipped(SkipReason::EmptyBook));
        summary.record(&MarketOutcome::skipped(SkipReason::EmptyBook));
        summary.record(&MarketOutcome::skipped(SkipReason::NoBaseBalance));
        summary.record(&MarketOutcome::failed("timeout"));

        assert_eq!(summary.pass, 3);
        assert_eq!(summary.markets, 5);
        assert_eq!(summary.orders_submitted, 2);
        assert_eq!(summary.insufficient_funds, 1);
        assert_eq!(summary.skipped_total(), 3);
        assert_eq!(summary.skipped_for(SkipReason::EmptyBook), 2);
        assert_eq!(summary.skipped_for(SkipReason::BalanceBelowMinimum), 0);
        assert_eq!(summary.failed, 1);

        summary.finish(Duration::from_millis(420));
    }

    #[test]
    fn test_failed_market_still_counts_accepted_legs() {
        let mut summary = PassSummary::new(1);
        summary.record(&MarketOutcome::failed_after(
            "connection reset",
            vec![submitted(Side::Bid, 200, json!({"id": "7"}))],
        ));

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.orders_submitted, 1);
        assert_eq!(summary.insufficient_funds, 0);
    }

    #[test]
    fn test_empty_pass() {
        let summary = PassSummary::new(1);
        assert_eq!(summary.markets, 0);
        assert_eq!(summary.skipped_total(), 0);
    }
}
