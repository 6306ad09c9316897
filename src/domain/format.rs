//! Reserve Formatter - Raw Pool Data to Human Units
//!
//! Pure functions that turn raw on-chain reserve rows into formatted
//! records: ray rates become unit-scale APR/APY strings, token amounts
//! are scaled by their decimals, and USD values are derived from the
//! market reference price. No I/O happens here; callers supply the
//! timestamp so the output is deterministic.

use alloy::primitives::U256;

use super::ray::{
    RAY, RAY_DECIMALS, SECONDS_PER_YEAR, calculate_compounded_rate, compounded_balance, normalize,
};
use super::reserve::{FormattedReserve, RawReserve};

/// Decimal places of the USD prices reported by the Aave oracle.
pub const USD_DECIMALS: u32 = 8;

/// Current unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
    // Pool timestamps are u40 seconds; clamp instead of wrapping if the
    // host clock is somehow before the epoch.
    let now = chrono::Utc::now().timestamp();
    u64::try_from(now).unwrap_or(0)
}

/// Formats every reserve of a pool against the market reference currency.
///
/// Output order matches input order exactly. `current_timestamp` is the
/// unix time the variable debt is compounded up to,
/// `market_reference_currency_decimals` and `market_reference_price_in_usd`
/// come from the pool's base currency metadata.
pub fn format_reserves(
    reserves: &[RawReserve],
    current_timestamp: u64,
    market_reference_currency_decimals: u8,
    market_reference_price_in_usd: U256,
) -> Vec<FormattedReserve> {
    reserves
        .iter()
        .map(|reserve| {
            format_reserve(
                reserve,
                current_timestamp,
                market_reference_currency_decimals,
                market_reference_price_in_usd,
            )
        })
        .collect()
}

fn format_reserve(
    reserve: &RawReserve,
    current_timestamp: u64,
    market_reference_currency_decimals: u8,
    market_reference_price_in_usd: U256,
) -> FormattedReserve {
    let liquidity_rate = U256::from(reserve.liquidity_rate);
    let variable_borrow_rate = U256::from(reserve.variable_borrow_rate);

    // APR is the ray rate itself; APY compounds it per-second over a year.
    let supply_apy = calculate_compounded_rate(liquidity_rate, SECONDS_PER_YEAR);
    let variable_borrow_apy = calculate_compounded_rate(variable_borrow_rate, SECONDS_PER_YEAR);

    // Scaled debt grows with the borrow index, compounded since the last
    // on-chain update.
    let total_variable_debt = compounded_balance(
        reserve.total_scaled_variable_debt,
        U256::from(reserve.variable_borrow_index),
        variable_borrow_rate,
        current_timestamp,
        reserve.last_update_timestamp,
    );
    let total_liquidity = reserve.available_liquidity.saturating_add(total_variable_debt);

    let borrow_usage_ratio = if total_liquidity.is_zero() {
        "0".to_string()
    } else {
        normalize(
            total_variable_debt.saturating_mul(RAY) / total_liquidity,
            RAY_DECIMALS,
        )
    };

    // price (ref units) x ref price (USD, 8 decimals) carries
    // ref_decimals + USD_DECIMALS fractional places.
    let price_in_usd = normalize(
        reserve
            .price_in_market_reference_currency
            .saturating_mul(market_reference_price_in_usd),
        u32::from(market_reference_currency_decimals) + USD_DECIMALS,
    );
    let available_liquidity_usd = normalize(
        reserve
            .available_liquidity
            .saturating_mul(reserve.price_in_market_reference_currency)
            .saturating_mul(market_reference_price_in_usd),
        u32::from(reserve.decimals) + u32::from(market_reference_currency_decimals) + USD_DECIMALS,
    );

    let token_decimals = u32::from(reserve.decimals);

    FormattedReserve {
        id: reserve.id.clone(),
        underlying_asset: reserve.underlying_asset,
        name: reserve.name.clone(),
        symbol: reserve.symbol.clone(),
        decimals: reserve.decimals,
        supply_apr: normalize(liquidity_rate, RAY_DECIMALS),
        supply_apy: normalize(supply_apy, RAY_DECIMALS),
        variable_borrow_apr: normalize(variable_borrow_rate, RAY_DECIMALS),
        variable_borrow_apy: normalize(variable_borrow_apy, RAY_DECIMALS),
        price_in_market_reference_currency: normalize(
            reserve.price_in_market_reference_currency,
            u32::from(market_reference_currency_decimals),
        ),
        price_in_usd,
        available_liquidity: normalize(reserve.available_liquidity, token_decimals),
        available_liquidity_usd,
        total_variable_debt: normalize(total_variable_debt, token_decimals),
        total_liquidity: normalize(total_liquidity, token_decimals),
        borrow_usage_ratio,
        usage_as_collateral_enabled: reserve.usage_as_collateral_enabled,
        borrowing_enabled: reserve.borrowing_enabled,
        is_frozen: reserve.is_frozen,
        is_paused: reserve.is_paused,
        is_isolated: !reserve.debt_ceiling.is_zero(),
        a_token_address: reserve.a_token_address,
        variable_debt_token_address: reserve.variable_debt_token_address,
    }
}
