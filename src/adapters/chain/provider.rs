//! Read-Only RPC Provider - alloy-rs 0.9 Connection Management
//!
//! Builds the HTTP provider for whichever chain a request targets and
//! exposes a shared instance for on-chain reads.
//!
//! In alloy 0.9, `ProviderBuilder::new().on_http()` returns a complex
//! filler type. We store it as a type-erased `dyn Provider` to keep
//! the API clean across the adapter layer.

use std::sync::Arc;

use alloy::providers::{Provider, ProviderBuilder};
use tracing::debug;

use crate::config::ChainConfig;
use crate::error::{MarketDataError, Result};

/// Read-only RPC provider backed by alloy-rs 0.9.
///
/// Uses `dyn Provider` for type erasure because alloy 0.9's
/// `ProviderBuilder::new().on_http()` returns a deeply-nested
/// generic filler type that would leak implementation details.
pub struct ReadOnlyProvider {
    /// The alloy HTTP provider for the target chain (type-erased).
    provider: Arc<dyn Provider + Send + Sync>,
    /// RPC endpoint URL (for diagnostics, never logged with secrets).
    rpc_url: String,
}

impl ReadOnlyProvider {
    /// Build a provider for the given chain.
    ///
    /// The RPC URL comes from the chain's configuration entry (never
    /// hardcoded). Construction is synchronous and performs no network
    /// I/O; a bad URL is the only way this fails.
    pub fn connect(chain: &ChainConfig) -> Result<Self> {
        let url = chain
            .rpc_url
            .parse()
            .map_err(|_| MarketDataError::InvalidRpcUrl {
                chain: chain.chain_id,
                url: chain.rpc_url.clone(),
            })?;

        // alloy 0.9: on_http() is synchronous, returns impl Provider
        let provider = ProviderBuilder::new().on_http(url);

        // Wrap in Arc<dyn Provider> for type erasure
        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(provider);

        debug!(chain = %chain.name, url = %chain.rpc_url, "Initialized RPC provider");

        Ok(Self {
            provider,
            rpc_url: chain.rpc_url.clone(),
        })
    }

    /// Get a shared reference to the alloy provider (type-erased).
    pub fn inner(&self) -> Arc<dyn Provider + Send + Sync> {
        Arc::clone(&self.provider)
    }

    /// The RPC endpoint this provider talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    use crate::config::ChainId;

    fn chain_with_url(rpc_url: &str) -> ChainConfig {
        ChainConfig {
            name: "polygon".to_string(),
            chain_id: ChainId::POLYGON,
            rpc_url: rpc_url.to_string(),
            ui_pool_data_provider: address!("C69728f11E9E6127733751c8410432913123acf1"),
            pool_address_provider: address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
        }
    }

    #[test]
    fn test_connect_accepts_valid_url_without_io() {
        let provider = ReadOnlyProvider::connect(&chain_with_url("https://polygon-rpc.com"))
            .expect("valid URL should build a provider");
        assert_eq!(provider.rpc_url(), "https://polygon-rpc.com");
    }

    #[test]
    fn test_connect_rejects_malformed_url() {
        let err = ReadOnlyProvider::connect(&chain_with_url("not a url"))
            .expect_err("malformed URL must be rejected");
        match err {
            MarketDataError::InvalidRpcUrl { chain, url } => {
                assert_eq!(chain, ChainId::POLYGON);
                assert_eq!(url, "not a url");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
