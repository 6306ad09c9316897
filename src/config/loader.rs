//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating every chain entry, and
//! providing clear error messages for misconfiguration. Addresses and
//! URLs are parsed eagerly here so a typo fails at startup instead of
//! at request time.

use std::collections::BTreeSet;
use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::{AppConfig, ChainConfig, ChainId};

/// Raw shape of `config.toml` before validation.
#[derive(Debug, Deserialize)]
struct ConfigFile {
  /// Configured chains.
  chains: Vec<ChainEntry>,
  /// Optional permit token tables.
  #[serde(default)]
  permit: Vec<PermitEntry>,
}

/// One `[[chains]]` entry as written in the file.
#[derive(Debug, Deserialize)]
struct ChainEntry {
  name: String,
  chain_id: u64,
  rpc_url: String,
  ui_pool_data_provider: String,
  pool_address_provider: String,
}

/// One `[[permit]]` entry as written in the file.
#[derive(Debug, Deserialize)]
struct PermitEntry {
  chain_id: u64,
  tokens: Vec<String>,
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - A chain entry carries an invalid URL or address
/// - A permit table references an unconfigured chain
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    chains = config.chains().count(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let file: ConfigFile = toml::from_str(content).context("Failed to parse config.toml")?;

  anyhow::ensure!(
    !file.chains.is_empty(),
    "At least one chain must be configured"
  );

  let mut chains = Vec::with_capacity(file.chains.len());
  let mut seen_ids = BTreeSet::new();

  for entry in &file.chains {
    anyhow::ensure!(
      !entry.name.is_empty(),
      "Chain {} has an empty name",
      entry.chain_id
    );
    anyhow::ensure!(
      seen_ids.insert(entry.chain_id),
      "Chain id {} is configured twice",
      entry.chain_id
    );

    entry
      .rpc_url
      .parse::<reqwest::Url>()
      .with_context(|| format!("Chain {} has an invalid rpc_url", entry.name))?;

    let ui_pool_data_provider: Address = entry
      .ui_pool_data_provider
      .parse()
      .with_context(|| format!("Chain {} has an invalid ui_pool_data_provider", entry.name))?;
    let pool_address_provider: Address = entry
      .pool_address_provider
      .parse()
      .with_context(|| format!("Chain {} has an invalid pool_address_provider", entry.name))?;

    chains.push(ChainConfig {
      name: entry.name.clone(),
      chain_id: ChainId(entry.chain_id),
      rpc_url: entry.rpc_url.clone(),
      ui_pool_data_provider,
      pool_address_provider,
    });
  }

  let mut permit_tokens = Vec::with_capacity(file.permit.len());
  let mut seen_permit_ids = BTreeSet::new();

  for entry in &file.permit {
    anyhow::ensure!(
      seen_ids.contains(&entry.chain_id),
      "Permit table references unconfigured chain id {}",
      entry.chain_id
    );
    anyhow::ensure!(
      seen_permit_ids.insert(entry.chain_id),
      "Chain id {} has two permit tables",
      entry.chain_id
    );

    let mut tokens = BTreeSet::new();
    for token in &entry.tokens {
      let address: Address = token.parse().with_context(|| {
        format!(
          "Permit table for chain {} has an invalid token address: {token}",
          entry.chain_id
        )
      })?;
      tokens.insert(address);
    }

    // An empty token list is a valid, deliberately exhaustive table.
    permit_tokens.push((ChainId(entry.chain_id), tokens));
  }

  Ok(AppConfig::from_parts(chains, permit_tokens))
}
