//! Error Taxonomy - Typed Failures for the Data Path
//!
//! Separates configuration errors (unknown chain, bad endpoint) from
//! network and decoding failures so callers can branch on the cause.
//! Missing permit data is deliberately NOT an error (see the diagnostics
//! port); wiring-level code such as config loading uses `anyhow` instead.

use alloy::transports::TransportError;
use thiserror::Error;

use crate::config::ChainId;

/// Convenience alias for data-path results.
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// Failures surfaced by the market data operations.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// The requested chain id has no entry in the chain configuration
    /// table. Raised before any network activity.
    #[error("unknown chain id {0}")]
    UnknownChain(ChainId),

    /// The configured RPC endpoint is not a parseable URL.
    #[error("invalid RPC URL for chain {chain}: {url}")]
    InvalidRpcUrl {
        /// Chain whose configuration entry is broken.
        chain: ChainId,
        /// The offending URL string.
        url: String,
    },

    /// Transport failure or contract revert during the pool data call.
    /// Surfaced unchanged: no retry, no fallback.
    #[error("pool data request failed: {0}")]
    Rpc(#[from] TransportError),

    /// The aggregation contract returned bytes that do not decode.
    #[error("pool data response did not decode: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    /// An on-chain value fell outside the humanized domain
    /// (e.g. token decimals that do not fit `u8`).
    #[error("malformed reserve data: {0}")]
    MalformedReserve(String),
}
