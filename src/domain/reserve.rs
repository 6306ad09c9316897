//! Reserve Records - Raw and Formatted Pool Data
//!
//! Data carried between the on-chain source, the formatter, and the
//! market assembler. `RawReserve` is the humanized projection of the
//! aggregation contract's tuple (typed addresses, narrowed widths, a
//! synthesized `id`); `FormattedReserve` is the human-readable result of
//! the formatting pipeline with every numeric field rendered as an exact
//! decimal string.
//!
//! Serialized field names keep the spellings the Aave interface uses
//! (`supplyAPY`, `priceInUSD`, ...), so output is drop-in comparable with
//! other tooling around the protocol.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One reserve as returned by the aggregation contract, humanized.
///
/// Rates and the borrow index are ray-scale (27 decimals); balances are
/// in the token's base units. Stable-rate fields are not carried: the
/// formatter derives nothing from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReserve {
    /// "{chain_id}-{underlying_asset}-{pool_address_provider}", lowercase.
    pub id: String,
    /// Token address this reserve wraps.
    pub underlying_asset: Address,
    /// On-chain token name.
    pub name: String,
    /// On-chain token symbol.
    pub symbol: String,
    /// Token decimal precision.
    pub decimals: u8,
    /// Current supply rate, ray APR.
    pub liquidity_rate: u128,
    /// Current variable borrow rate, ray APR.
    pub variable_borrow_rate: u128,
    /// Variable borrow index at the last reserve update, ray.
    pub variable_borrow_index: u128,
    /// Unix timestamp of the last reserve update.
    pub last_update_timestamp: u64,
    /// Liquidity available to borrow, token base units.
    pub available_liquidity: U256,
    /// Total borrowed principal, scaled by the borrow index.
    pub total_scaled_variable_debt: U256,
    /// Asset price in the market reference currency.
    pub price_in_market_reference_currency: U256,
    /// Whether the asset can back other borrows.
    pub usage_as_collateral_enabled: bool,
    /// Whether the asset can be borrowed.
    pub borrowing_enabled: bool,
    /// Administratively frozen (no new supply/borrow).
    pub is_frozen: bool,
    /// Administratively paused (no operations at all).
    pub is_paused: bool,
    /// Isolation-mode debt ceiling; non-zero marks an isolated asset.
    pub debt_ceiling: U256,
    /// Interest-bearing aToken contract.
    pub a_token_address: Address,
    /// Variable debt token contract.
    pub variable_debt_token_address: Address,
}

/// Base-currency metadata returned alongside the reserve array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCurrencyData {
    /// Decimals of the market reference currency.
    pub market_reference_currency_decimals: u8,
    /// USD price of one reference-currency unit, 8 decimals.
    pub market_reference_price_in_usd: U256,
}

/// Everything one aggregation-contract read returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReserves {
    /// Reserves in on-chain array order.
    pub reserves: Vec<RawReserve>,
    /// Shared base-currency metadata.
    pub base_currency: BaseCurrencyData,
}

/// A reserve after formatting: identity fields passed through, every
/// numeric figure rendered as an exact decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedReserve {
    /// Reserve identifier, passed through from the raw record.
    pub id: String,
    /// Token address this reserve wraps.
    pub underlying_asset: Address,
    /// On-chain token name.
    pub name: String,
    /// On-chain token symbol.
    pub symbol: String,
    /// Token decimal precision.
    pub decimals: u8,
    /// Supply APR, unit scale ("0.05" = 5%).
    #[serde(rename = "supplyAPR")]
    pub supply_apr: String,
    /// Supply APY after per-second compounding.
    #[serde(rename = "supplyAPY")]
    pub supply_apy: String,
    /// Variable borrow APR, unit scale.
    #[serde(rename = "variableBorrowAPR")]
    pub variable_borrow_apr: String,
    /// Variable borrow APY after per-second compounding.
    #[serde(rename = "variableBorrowAPY")]
    pub variable_borrow_apy: String,
    /// Asset price in the market reference currency.
    pub price_in_market_reference_currency: String,
    /// Asset price in USD.
    #[serde(rename = "priceInUSD")]
    pub price_in_usd: String,
    /// Liquidity available to borrow, token units.
    pub available_liquidity: String,
    /// Available liquidity valued in USD.
    #[serde(rename = "availableLiquidityUSD")]
    pub available_liquidity_usd: String,
    /// Variable debt grown to the current timestamp, token units.
    pub total_variable_debt: String,
    /// Available liquidity plus total debt, token units.
    pub total_liquidity: String,
    /// total_variable_debt / total_liquidity, unit scale.
    pub borrow_usage_ratio: String,
    /// Whether the asset can back other borrows.
    pub usage_as_collateral_enabled: bool,
    /// Whether the asset can be borrowed.
    pub borrowing_enabled: bool,
    /// Administratively frozen.
    pub is_frozen: bool,
    /// Administratively paused.
    pub is_paused: bool,
    /// Non-zero debt ceiling (isolation mode).
    pub is_isolated: bool,
    /// Interest-bearing aToken contract.
    pub a_token_address: Address,
    /// Variable debt token contract.
    pub variable_debt_token_address: Address,
}
