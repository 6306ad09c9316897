//! Pool Data Source Port - Aggregated Reserve Read Interface
//!
//! Defines the trait for fetching the reserve rows and base currency
//! metadata of one pool. The chain adapter implements it against the
//! UiPoolDataProvider contract; tests implement it in memory.

use async_trait::async_trait;

use crate::config::ChainConfig;
use crate::domain::reserve::PoolReserves;
use crate::error::Result;

/// Trait for reading a pool's aggregated reserve data.
///
/// A single call returns every reserve row plus the base currency
/// metadata in one logical read, so the rows are mutually consistent.
/// The hexagonal architecture keeps RPC details out of the use cases.
#[async_trait]
pub trait PoolDataSource: Send + Sync + 'static {
  /// Fetch all reserve rows and base currency info for `chain`.
  async fn fetch_reserves(&self, chain: &ChainConfig) -> Result<PoolReserves>;
}
