//! Tracing Diagnostics - Permit Gap Reports as Structured Logs
//!
//! Default `MarketDiagnostics` implementation: capability gaps become
//! `warn!` events. The market assembly stays on its happy path; an
//! operator watching the logs sees exactly which chain or token needs
//! a permit table update.

use alloy::primitives::Address;
use tracing::warn;

use crate::config::ChainId;
use crate::ports::diagnostics::MarketDiagnostics;

/// Reports permit capability gaps through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl MarketDiagnostics for TracingDiagnostics {
    fn permit_table_missing(&self, chain: ChainId) {
        warn!(chain = %chain, "No permit token table configured for chain");
    }

    fn permit_entry_missing(&self, chain: ChainId, asset: Address) {
        warn!(chain = %chain, asset = %asset, "Token missing from permit table");
    }
}
