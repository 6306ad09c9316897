//! Configuration Module - Chain Registry and Permit Tables
//!
//! Loads and validates configuration from `config.toml`, with a
//! built-in registry of well-known deployments as fallback. All
//! contract addresses and RPC endpoints are externalized here -
//! nothing is hardcoded in the domain layer.

pub mod loader;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// Numeric EVM chain identifier (EIP-155).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
  /// Ethereum mainnet.
  pub const ETHEREUM: ChainId = ChainId(1);
  /// Polygon PoS mainnet.
  pub const POLYGON: ChainId = ChainId(137);
  /// Avalanche C-Chain.
  pub const AVALANCHE: ChainId = ChainId(43_114);
}

impl fmt::Display for ChainId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for ChainId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse::<u64>().map(ChainId)
  }
}

impl From<u64> for ChainId {
  fn from(id: u64) -> Self {
    ChainId(id)
  }
}

/// One configured Aave deployment.
///
/// Both contract addresses are required: `ui_pool_data_provider` is the
/// periphery contract the data call goes to, `pool_address_provider`
/// identifies which pool that contract should aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
  /// Human-readable chain name ("polygon").
  pub name: String,
  /// EIP-155 chain id.
  pub chain_id: ChainId,
  /// HTTP RPC endpoint for read calls.
  pub rpc_url: String,
  /// UiPoolDataProvider periphery contract.
  pub ui_pool_data_provider: Address,
  /// PoolAddressesProvider of the target pool.
  pub pool_address_provider: Address,
}

/// Top-level application configuration.
///
/// Holds the chain registry plus per-chain permit token tables. Built
/// once at startup and never mutated afterwards; lookups hand out
/// shared references.
#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Configured chains, keyed by chain id.
  chains: BTreeMap<ChainId, ChainConfig>,
  /// Tokens known to support EIP-2612 permit, per chain.
  permit_tokens: BTreeMap<ChainId, BTreeSet<Address>>,
}

impl AppConfig {
  /// Assemble a configuration from explicit parts.
  ///
  /// Chains are keyed by their own `chain_id` field. A chain missing
  /// from `permit_tokens` has no table at all, which is different from
  /// a chain mapped to an empty set.
  pub fn from_parts(
    chains: impl IntoIterator<Item = ChainConfig>,
    permit_tokens: impl IntoIterator<Item = (ChainId, BTreeSet<Address>)>,
  ) -> Self {
    Self {
      chains: chains.into_iter().map(|c| (c.chain_id, c)).collect(),
      permit_tokens: permit_tokens.into_iter().collect(),
    }
  }

  /// Look up a chain by id.
  pub fn chain(&self, id: ChainId) -> Option<&ChainConfig> {
    self.chains.get(&id)
  }

  /// Look up a chain by its configured name, case-insensitive.
  pub fn chain_by_name(&self, name: &str) -> Option<&ChainConfig> {
    self
      .chains
      .values()
      .find(|c| c.name.eq_ignore_ascii_case(name))
  }

  /// The permit token table for a chain.
  ///
  /// `None` means no table is configured for the chain; `Some` with an
  /// empty set means a table exists but lists nothing.
  pub fn permit_tokens(&self, id: ChainId) -> Option<&BTreeSet<Address>> {
    self.permit_tokens.get(&id)
  }

  /// Iterate over all configured chains in chain-id order.
  pub fn chains(&self) -> impl Iterator<Item = &ChainConfig> {
    self.chains.values()
  }

  /// Built-in registry of well-known Aave V3 deployments.
  ///
  /// Used when no `config.toml` is present. Ethereum deliberately
  /// carries no permit table: several of its blue-chip reserves predate
  /// EIP-2612, so a curated list is maintained per chain rather than
  /// assumed.
  pub fn builtin() -> Self {
    let chains = [
      ChainConfig {
        name: "ethereum".to_string(),
        chain_id: ChainId::ETHEREUM,
        rpc_url: "https://eth.llamarpc.com".to_string(),
        ui_pool_data_provider: address!("91c0eA31b49B69Ea18607702c5d9aC360bf3dE7d"),
        pool_address_provider: address!("2f39d218133AFaB8F2B819B1066c7E434Ad94E9e"),
      },
      ChainConfig {
        name: "polygon".to_string(),
        chain_id: ChainId::POLYGON,
        rpc_url: "https://polygon-rpc.com".to_string(),
        ui_pool_data_provider: address!("C69728f11E9E6127733751c8410432913123acf1"),
        pool_address_provider: address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
      },
      ChainConfig {
        name: "avalanche".to_string(),
        chain_id: ChainId::AVALANCHE,
        rpc_url: "https://api.avax.network/ext/bc/C/rpc".to_string(),
        ui_pool_data_provider: address!("F71DBe0FAEF1473ffC607d4c555dfF0aEaDb878d"),
        pool_address_provider: address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
      },
    ];

    let permit_tokens = [
      (
        ChainId::POLYGON,
        BTreeSet::from([
          // USDC
          address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
          // DAI
          address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
          // AAVE
          address!("D6DF932A45C0f255f85145f286eA0b292B21C90B"),
        ]),
      ),
      (
        ChainId::AVALANCHE,
        BTreeSet::from([
          // USDC
          address!("B97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E"),
          // DAI.e
          address!("d586E7F844cEa2F87f50152665BCbc2C279D8d70"),
        ]),
      ),
    ];

    Self::from_parts(chains, permit_tokens)
  }
}
