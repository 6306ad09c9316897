//! Market Record - Public Output of Market Assembly
//!
//! The projection of a formatted reserve that `fetch_markets_data`
//! returns: identity and liquidity fields passed through verbatim, plus
//! the derived `support_permit` capability flag. Only reserves that are
//! neither frozen nor paused are projected.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use super::reserve::FormattedReserve;

/// One lending market, annotated with permit capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Reserve identifier.
    pub id: String,
    /// Token address this market wraps.
    pub underlying_asset: Address,
    /// On-chain token name.
    pub name: String,
    /// On-chain token symbol.
    pub symbol: String,
    /// Token decimal precision.
    pub decimals: u8,
    /// Supply APY, unit scale.
    #[serde(rename = "supplyAPY")]
    pub supply_apy: String,
    /// Asset price in USD.
    pub market_reference_price_in_usd: String,
    /// Whether the asset can back other borrows.
    pub usage_as_collateral_enabled: bool,
    /// Whether the asset can be borrowed.
    pub borrowing_enabled: bool,
    /// Interest-bearing aToken contract.
    pub a_token_address: Address,
    /// Variable debt token contract.
    pub variable_debt_token_address: Address,
    /// Non-zero debt ceiling (isolation mode).
    pub is_isolated: bool,
    /// Liquidity available to borrow, token units.
    pub available_liquidity: String,
    /// Available liquidity valued in USD.
    #[serde(rename = "availableLiquidityUSD")]
    pub available_liquidity_usd: String,
    /// Variable borrow APY, unit scale.
    #[serde(rename = "variableBorrowAPY")]
    pub variable_borrow_apy: String,
    /// Whether the underlying asset supports EIP-2612 permit approvals.
    pub support_permit: bool,
}

impl Market {
    /// Projects a formatted reserve into its market record.
    ///
    /// Every field except `support_permit` is moved through unchanged;
    /// the caller decides the flag from the permit capability table.
    pub fn from_reserve(reserve: FormattedReserve, support_permit: bool) -> Self {
        Self {
            id: reserve.id,
            underlying_asset: reserve.underlying_asset,
            name: reserve.name,
            symbol: reserve.symbol,
            decimals: reserve.decimals,
            supply_apy: reserve.supply_apy,
            market_reference_price_in_usd: reserve.price_in_usd,
            usage_as_collateral_enabled: reserve.usage_as_collateral_enabled,
            borrowing_enabled: reserve.borrowing_enabled,
            a_token_address: reserve.a_token_address,
            variable_debt_token_address: reserve.variable_debt_token_address,
            is_isolated: reserve.is_isolated,
            available_liquidity: reserve.available_liquidity,
            available_liquidity_usd: reserve.available_liquidity_usd,
            variable_borrow_apy: reserve.variable_borrow_apy,
            support_permit,
        }
    }
}
