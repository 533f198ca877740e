//! Main application orchestration.
//!
//! Coordinates:
//! - Market discovery and filtering (once, at startup)
//! - The polling loop: one pass over every market, then a fixed sleep
//! - Quote planning and order submission per market
//! - Side switching (side_switch mode)
//! - Pass summaries and metrics

use crate::config::AppConfig;
use crate::error::AppResult;
use bpx_client::{BackpackClient, Exchange, RequestSigner};
use bpx_core::{
    filter_markets, Market, MarketOutcome, OrderRequest, Side, SkipReason, SubmittedOrder,
};
use bpx_strategy::{plan_quotes, QuotePlan, QuotingMode, SidePlan, SideSwitcher, SwitchTrigger};
use bpx_telemetry::{LogArchiver, Metrics, PassSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info, warn};

/// Main application.
pub struct Application<E: Exchange> {
    config: AppConfig,
    exchange: E,
    /// Markets selected at startup; fixed for the life of the process.
    markets: Vec<Market>,
    switcher: SideSwitcher,
    rng: StdRng,
    pass: u64,
    archiver: LogArchiver,
}

impl Application<BackpackClient> {
    /// Create the application with a signed Backpack client.
    ///
    /// # Errors
    /// Fails when the credentials are malformed or do not match each other.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let signer = RequestSigner::from_base64(
            &config.credentials.public_key,
            &config.credentials.secret_key,
        )?;
        let client = BackpackClient::new(&config.api_url)?
            .with_signer(signer)
            .with_window_ms(config.request_window_ms);

        Ok(Self::with_exchange(config, client, StdRng::from_os_rng()))
    }
}

impl<E: Exchange> Application<E> {
    /// Create the application over any exchange implementation.
    pub fn with_exchange(config: AppConfig, exchange: E, rng: StdRng) -> Self {
        let switcher = SideSwitcher::new(config.strategy.side_switch_interval(), Instant::now());
        let archiver = LogArchiver::new(&config.logging);
        Self {
            config,
            exchange,
            markets: Vec::new(),
            switcher,
            rng,
            pass: 0,
            archiver,
        }
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Current side of the switcher (meaningful in side_switch mode).
    pub fn side(&self) -> Side {
        self.switcher.side()
    }

    /// Passes completed so far.
    pub fn passes(&self) -> u64 {
        self.pass
    }

    /// Fetch the market list and keep the configured market types.
    ///
    /// # Returns
    /// Number of markets selected.
    pub async fn discover_markets(&mut self) -> AppResult<usize> {
        let all = self.exchange.get_markets().await?;
        let total = all.len();
        self.markets = filter_markets(all, self.config.market_type);

        info!(
            selector = %self.config.market_type,
            listed = total,
            "Found {} markets",
            self.markets.len()
        );
        if self.markets.is_empty() {
            warn!(selector = %self.config.market_type, "No markets match the configured market type");
        }
        Metrics::markets_selected(self.markets.len());
        Ok(self.markets.len())
    }

    /// Run passes until Ctrl-C.
    pub async fn run(self) -> AppResult<()> {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        self.run_until(shutdown).await.map(|_| ())
    }

    /// Run passes until `shutdown` resolves.
    ///
    /// Shutdown is only observed during the sleep between passes, so a pass
    /// that has started always completes.
    ///
    /// # Returns
    /// Number of passes completed.
    pub async fn run_until<F>(mut self, shutdown: F) -> AppResult<u64>
    where
        F: Future<Output = ()>,
    {
        let interval = self.config.order_interval();
        info!(
            mode = ?self.config.strategy.mode,
            markets = self.markets.len(),
            interval_secs = interval.as_secs(),
            "Entering polling loop"
        );

        tokio::pin!(shutdown);
        loop {
            self.run_pass().await;
            self.archiver.tick();

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!(passes = self.pass, "Shutting down");
        Ok(self.pass)
    }

    /// One pass over every selected market, in order.
    ///
    /// A failure in one market is recorded and the pass moves on.
    pub async fn run_pass(&mut self) -> Vec<(String, MarketOutcome)> {
        self.pass += 1;
        let started = Instant::now();

        if self.config.strategy.mode == QuotingMode::SideSwitch
            && self.switcher.on_tick(started).is_some()
        {
            Metrics::side_switched(SwitchTrigger::Timer.as_str());
        }

        let mut summary = PassSummary::new(self.pass);
        let markets = std::mem::take(&mut self.markets);
        let mut outcomes = Vec::with_capacity(markets.len());

        for market in &markets {
            let outcome = match self.process_market(market).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(symbol = %market.symbol, error = %e, "Market processing failed");
                    MarketOutcome::failed(e)
                }
            };
            summary.record(&outcome);
            outcomes.push((market.symbol.clone(), outcome));
        }

        self.markets = markets;
        summary.finish(started.elapsed());
        outcomes
    }

    async fn process_market(&mut self, market: &Market) -> AppResult<MarketOutcome> {
        let sides = match self.config.strategy.mode {
            QuotingMode::DualSide => SidePlan::Both,
            QuotingMode::SideSwitch => SidePlan::Single(self.switcher.side()),
        };

        // A spot sell is capped by the base-token balance.
        let base_available = if sides == SidePlan::Single(Side::Ask) && !market.is_perp() {
            let balances = self.exchange.get_balances().await?;
            let available = balances
                .get(market.base_token())
                .map(|b| b.available)
                .unwrap_or(Decimal::ZERO);
            if available <= Decimal::ZERO {
                info!(symbol = %market.symbol, token = market.base_token(), "No balance to sell, skipping");
                return Ok(MarketOutcome::skipped(SkipReason::NoBaseBalance));
            }
            Some(available)
        } else {
            None
        };

        let depth = self.exchange.get_depth(&market.symbol).await?;
        let quotes = match plan_quotes(market, &depth, sides, base_available, &mut self.rng)? {
            QuotePlan::Quote(quotes) => quotes,
            QuotePlan::Skip(reason) => {
                warn!(symbol = %market.symbol, %reason, "Skipping market");
                return Ok(MarketOutcome::skipped(reason));
            }
        };

        let mut orders = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let request = OrderRequest::limit_gtc(&market.symbol, &quote);
            info!(
                symbol = %market.symbol,
                side = %quote.side,
                price = %quote.price,
                quantity = %quote.quantity,
                "Placing order"
            );

            let response = match self.exchange.execute_order(&request).await {
                Ok(response) => response,
                Err(e) => {
                    error!(
                        symbol = %market.symbol,
                        side = %quote.side,
                        submitted = orders.len(),
                        error = %e,
                        "Order submission failed"
                    );
                    return Ok(MarketOutcome::failed_after(e, orders));
                }
            };
            info!(
                symbol = %market.symbol,
                side = %quote.side,
                status = response.status,
                "Order response: {response}"
            );

            if self.config.strategy.mode == QuotingMode::SideSwitch
                && self
                    .switcher
                    .on_order_response(&response, Instant::now())
                    .is_some()
            {
                Metrics::side_switched(SwitchTrigger::InsufficientFunds.as_str());
            }

            orders.push(SubmittedOrder { quote, response });
        }

        Ok(MarketOutcome::Submitted { orders })
    }
}
