//! Backpack volume bot - Entry Point

use anyhow::Result;
use bpx_bot::{AppConfig, Application};
use clap::Parser;
use tracing::info;

/// Backpack exchange market-making volume bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via BPX_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Determine config path: CLI arg > BPX_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("BPX_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    // Logging needs the [logging] section, so the config is loaded first
    let config = AppConfig::from_file(&config_path)?;
    let _log_guard = bpx_telemetry::init_logging(&config.logging)?;

    info!("Starting Backpack volume bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_path = %config_path,
        api_url = %config.api_url,
        market_type = %config.market_type,
        mode = ?config.strategy.mode,
        interval_secs = config.order_interval_secs,
        "Configuration loaded"
    );

    let mut app = Application::new(config)?;

    // Market list is fetched once; failure here is fatal
    app.discover_markets().await?;

    app.run().await?;

    Ok(())
}
