//! Aave Market Data CLI - Entry Point
//!
//! Fetches the lending markets of one chain and prints them as JSON.
//! Logs go to stderr so stdout stays machine-readable.
//!
//! Wiring sequence:
//! 1. Init tracing (JSON structured logging on stderr)
//! 2. Load config.toml if present, else the built-in registry
//! 3. Resolve the target chain from the CLI argument
//! 4. Fetch markets through MarketDataClient
//! 5. Log a per-market summary, print the full JSON to stdout

use anyhow::{Context, Result};
use tracing::info;

use aave_market_data::config::{AppConfig, ChainId, loader};
use aave_market_data::usecases::MarketDataClient;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Initialize structured JSON logging on stderr ─────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    // ── 2. Load configuration ───────────────────────────────
    let config = if std::path::Path::new("config.toml").exists() {
        loader::load_config("config.toml").context("Failed to load configuration")?
    } else {
        info!("No config.toml found, using built-in chain registry");
        AppConfig::builtin()
    };

    // ── 3. Resolve the target chain ─────────────────────────
    let Some(target) = std::env::args().nth(1) else {
        print_usage(&config);
        anyhow::bail!("missing chain argument");
    };

    if target == "-h" || target == "--help" {
        print_usage(&config);
        return Ok(());
    }

    let chain = resolve_chain(&config, &target)?;

    info!(
        chain = %chain,
        version = env!("CARGO_PKG_VERSION"),
        "Starting market data fetch"
    );

    // ── 4. Fetch markets over RPC ───────────────────────────
    let client = MarketDataClient::new(config);
    let markets = client.fetch_markets_data(chain).await?;

    // ── 5. Summarize and print ──────────────────────────────
    for market in &markets {
        info!(
            symbol = %market.symbol,
            supply_apy = %percent(&market.supply_apy),
            borrow_apy = %percent(&market.variable_borrow_apy),
            permit = market.support_permit,
            "Market"
        );
    }

    let json = serde_json::to_string_pretty(&markets).context("Failed to serialize markets")?;
    println!("{json}");

    Ok(())
}

/// Resolve a chain argument: a numeric value is used as a chain id
/// directly (the client reports unconfigured ids with a typed error),
/// anything else is looked up as a chain name.
fn resolve_chain(config: &AppConfig, target: &str) -> Result<ChainId> {
    if let Ok(id) = target.parse::<ChainId>() {
        return Ok(id);
    }
    config
        .chain_by_name(target)
        .map(|c| c.chain_id)
        .with_context(|| format!("unknown chain name: {target}"))
}

fn print_usage(config: &AppConfig) {
    eprintln!("Usage: aave-market-data <chain id | chain name>");
    eprintln!("Configured chains:");
    for chain in config.chains() {
        eprintln!("  {:>8}  {}", chain.chain_id, chain.name);
    }
}

/// Render a unit-scale rate string as a percentage with two decimals.
/// Falls back to the raw string if it does not parse as a decimal.
fn percent(rate: &str) -> String {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    Decimal::from_str(rate)
        .ok()
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .map(|d| format!("{}%", d.round_dp(2)))
        .unwrap_or_else(|| rate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_chain_accepts_numeric_id() {
        let config = AppConfig::builtin();
        assert_eq!(resolve_chain(&config, "137").unwrap(), ChainId::POLYGON);
        // Unconfigured ids pass through; the client turns them into a
        // typed error.
        assert_eq!(resolve_chain(&config, "999").unwrap(), ChainId(999));
    }

    #[test]
    fn test_resolve_chain_accepts_names() {
        let config = AppConfig::builtin();
        assert_eq!(
            resolve_chain(&config, "Avalanche").unwrap(),
            ChainId::AVALANCHE
        );
        assert!(resolve_chain(&config, "base").is_err());
    }

    #[test]
    fn test_percent_formats_rates() {
        assert_eq!(percent("0.05127"), "5.13%");
        assert_eq!(percent("0"), "0%");
        assert_eq!(percent("not-a-rate"), "not-a-rate");
    }
}
