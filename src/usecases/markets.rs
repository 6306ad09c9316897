//! Markets Use Case - Formatted Reserves and Market Assembly
//!
//! The two public read operations of the crate:
//! 1. `fetch_formatted_pool_reserves`: one aggregated on-chain read,
//!    formatted into human units against the reference currency
//! 2. `fetch_markets_data`: the same data filtered down to active
//!    markets and annotated with permit support
//!
//! Permit gaps never fail a call; they surface through the
//! `MarketDiagnostics` port while the data path stays on `Result`.

use std::collections::BTreeSet;

use alloy::primitives::Address;
use tracing::{info, instrument};

use crate::adapters::chain::UiPoolDataSource;
use crate::adapters::diagnostics::TracingDiagnostics;
use crate::config::{AppConfig, ChainId};
use crate::domain::format::{current_timestamp, format_reserves};
use crate::domain::market::Market;
use crate::domain::reserve::FormattedReserve;
use crate::error::{MarketDataError, Result};
use crate::ports::diagnostics::MarketDiagnostics;
use crate::ports::pool_source::PoolDataSource;

/// Read-only market data client over the configured chains.
///
/// Generic over its data source and diagnostics sink so tests can
/// inject in-memory fakes; production code uses the defaults.
pub struct MarketDataClient<S = UiPoolDataSource, D = TracingDiagnostics> {
  config: AppConfig,
  source: S,
  diagnostics: D,
}

impl MarketDataClient {
  /// Create a client with the on-chain source and tracing diagnostics.
  pub fn new(config: AppConfig) -> Self {
    Self::with_parts(config, UiPoolDataSource::new(), TracingDiagnostics)
  }
}

impl<S: PoolDataSource, D: MarketDiagnostics> MarketDataClient<S, D> {
  /// Create a client with an explicit source and diagnostics sink.
  pub fn with_parts(config: AppConfig, source: S, diagnostics: D) -> Self {
    Self {
      config,
      source,
      diagnostics,
    }
  }

  /// Fetch and format every reserve of a chain's pool.
  ///
  /// The chain entry is resolved first: an unconfigured id fails with
  /// `UnknownChain` before any network traffic. One aggregated read
  /// then returns all rows plus base currency metadata, and the pure
  /// formatter scales them at the current timestamp. Output order
  /// matches the on-chain row order.
  #[instrument(skip(self))]
  pub async fn fetch_formatted_pool_reserves(
    &self,
    chain: ChainId,
  ) -> Result<Vec<FormattedReserve>> {
    let chain_config = self
      .config
      .chain(chain)
      .ok_or(MarketDataError::UnknownChain(chain))?;

    let pool = self.source.fetch_reserves(chain_config).await?;

    let formatted = format_reserves(
      &pool.reserves,
      current_timestamp(),
      pool.base_currency.market_reference_currency_decimals,
      pool.base_currency.market_reference_price_in_usd,
    );

    info!(reserves = formatted.len(), "Formatted pool reserves");

    Ok(formatted)
  }

  /// Fetch the active markets of a chain, annotated with permit support.
  ///
  /// Reserve fetch failures propagate untouched. A chain without any
  /// permit table yields an empty list plus one chain-level diagnostic
  /// rather than an error; frozen and paused reserves are dropped.
  #[instrument(skip(self))]
  pub async fn fetch_markets_data(&self, chain: ChainId) -> Result<Vec<Market>> {
    let reserves = self.fetch_formatted_pool_reserves(chain).await?;

    let Some(permit_tokens) = self.config.permit_tokens(chain) else {
      self.diagnostics.permit_table_missing(chain);
      return Ok(Vec::new());
    };

    let markets = assemble_markets(chain, reserves, permit_tokens, &self.diagnostics);

    info!(markets = markets.len(), "Assembled markets");

    Ok(markets)
  }
}

/// Project formatted reserves into market records.
///
/// Frozen and paused reserves are dropped; the relative order of the
/// rest is preserved. A token absent from the permit table gets
/// `support_permit = false` and one asset-level diagnostic, never an
/// error.
pub fn assemble_markets<D: MarketDiagnostics>(
  chain: ChainId,
  reserves: Vec<FormattedReserve>,
  permit_tokens: &BTreeSet<Address>,
  diagnostics: &D,
) -> Vec<Market> {
  reserves
    .into_iter()
    .filter(|reserve| !reserve.is_frozen && !reserve.is_paused)
    .map(|reserve| {
      let support_permit = permit_tokens.contains(&reserve.underlying_asset);
      if !support_permit {
        diagnostics.permit_entry_missing(chain, reserve.underlying_asset);
      }
      Market::from_reserve(reserve, support_permit)
    })
    .collect()
}
