//! Diagnostics Port - Permit Capability Gap Reporting
//!
//! Permit capability gaps are reported out-of-band instead of failing
//! the call: a missing table or a missing token entry is advisory, and
//! the market list itself stays usable.

use alloy::primitives::Address;

use crate::config::ChainId;

/// Trait for reporting permit capability gaps.
///
/// Implementors decide where the reports go (tracing, counters, test
/// capture). Methods take `&self` so one instance can be shared.
pub trait MarketDiagnostics: Send + Sync {
  /// The chain has no permit token table configured at all.
  fn permit_table_missing(&self, chain: ChainId);

  /// The chain has a permit table, but `asset` is not listed in it.
  fn permit_entry_missing(&self, chain: ChainId, asset: Address);
}
