//! Ray Fixed-Point Arithmetic - 27-Decimal Rate Math
//!
//! Aave stores rates and interest indexes as "rays": unsigned fixed-point
//! values with 27 decimals. This module implements the ray operations the
//! reserve formatter depends on: half-up multiplication, binary
//! exponentiation for APR→APY conversion, the protocol's binomial
//! approximation for compounding debt between index updates, and exact
//! decimal-string rendering.
//! Reference: Aave V3 `WadRayMath` / `MathUtils` (Solidity).
//!
//! All operations are total: intermediate products saturate instead of
//! wrapping, so hostile on-chain values cannot panic the formatter.

use alloy::primitives::U256;

/// Number of decimals in a ray.
pub const RAY_DECIMALS: u32 = 27;

/// The ray unit, 10^27.
pub const RAY: U256 = U256::from_limbs([11_515_845_246_265_065_472, 54_210_108, 0, 0]);

/// Half a ray, used for half-up rounding in `ray_mul`.
pub const HALF_RAY: U256 = U256::from_limbs([5_757_922_623_132_532_736, 27_105_054, 0, 0]);

/// Seconds in the protocol's rate year (365 days).
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Multiplies two rays, rounding half up: (a * b + RAY/2) / RAY.
pub fn ray_mul(a: U256, b: U256) -> U256 {
    a.saturating_mul(b).saturating_add(HALF_RAY) / RAY
}

/// Raises a ray to an integer power by binary exponentiation.
///
/// `ray_pow(x, 0)` is one ray (the empty product). Cost is
/// O(log n) ray multiplications, so a full year of seconds
/// (n = 31 536 000) takes ~25 multiplications.
pub fn ray_pow(mut x: U256, mut n: u64) -> U256 {
    let mut z = if n % 2 == 0 { RAY } else { x };
    n /= 2;
    while n != 0 {
        x = ray_mul(x, x);
        if n % 2 != 0 {
            z = ray_mul(z, x);
        }
        n /= 2;
    }
    z
}

/// Converts a ray-scale APR into the compounded rate over `duration_secs`.
///
/// compounded = (RAY + rate/SECONDS_PER_YEAR)^duration - RAY
///
/// With `duration_secs = SECONDS_PER_YEAR` this is the APR→APY
/// conversion used for display rates. The per-second rate uses floor
/// division, matching the protocol.
pub fn calculate_compounded_rate(rate: U256, duration_secs: u64) -> U256 {
    let rate_per_second = rate / U256::from(SECONDS_PER_YEAR);
    ray_pow(RAY.saturating_add(rate_per_second), duration_secs).saturating_sub(RAY)
}

/// Interest accumulated since the reserve's last on-chain index update.
///
/// Third-order binomial approximation of
/// (1 + rate/SECONDS_PER_YEAR)^Δt, exactly as the protocol's
/// `MathUtils.calculateCompoundedInterest` computes it; display math has
/// to reproduce the approximation (not the exact power) to match
/// on-chain balances.
pub fn calculate_compounded_interest(
    rate: U256,
    current_timestamp: u64,
    last_update_timestamp: u64,
) -> U256 {
    let time_delta = U256::from(current_timestamp.saturating_sub(last_update_timestamp));
    let rate_per_second = rate / U256::from(SECONDS_PER_YEAR);
    binomial_approximated_ray_pow(rate_per_second, time_delta)
}

/// RAY + n*x + n(n-1)/2 * x^2 + n(n-1)(n-2)/6 * x^3, all in rays.
fn binomial_approximated_ray_pow(base: U256, exp: U256) -> U256 {
    if exp.is_zero() {
        return RAY;
    }
    let one = U256::from(1u8);
    let two = U256::from(2u8);
    let exp_minus_one = exp - one;
    let exp_minus_two = if exp > two { exp - two } else { U256::ZERO };

    let base_pow_two = ray_mul(base, base);
    let base_pow_three = ray_mul(base_pow_two, base);

    let first_term = exp.saturating_mul(base);
    let second_term = exp.saturating_mul(exp_minus_one).saturating_mul(base_pow_two) / two;
    let third_term = exp
        .saturating_mul(exp_minus_one)
        .saturating_mul(exp_minus_two)
        .saturating_mul(base_pow_three)
        / U256::from(6u8);

    RAY.saturating_add(first_term)
        .saturating_add(second_term)
        .saturating_add(third_term)
}

/// Grows a scaled balance to its current value.
///
/// balance = ray_mul(principal, ray_mul(compounded_interest, index))
///
/// `principal` is the scaled (index-divided) amount the token contract
/// stores; `index` is the reserve's borrow index at its last update.
/// A zero principal short-circuits to zero.
pub fn compounded_balance(
    principal: U256,
    index: U256,
    rate: U256,
    current_timestamp: u64,
    last_update_timestamp: u64,
) -> U256 {
    if principal.is_zero() {
        return U256::ZERO;
    }
    let interest = calculate_compounded_interest(rate, current_timestamp, last_update_timestamp);
    ray_mul(principal, ray_mul(interest, index))
}

/// 10^decimals, saturating at `U256::MAX` for exponents past 77.
pub fn ten_pow(decimals: u32) -> U256 {
    U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .unwrap_or(U256::MAX)
}

/// Renders `value` scaled down by `decimals` as an exact decimal string.
///
/// No scientific notation, no precision loss: "1500000" with 6 decimals
/// becomes "1.5", zero becomes "0", and fractional trailing zeros are
/// trimmed. The inverse of parsing a token amount into base units.
pub fn normalize(value: U256, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = ten_pow(decimals);
    let integer = value / scale;
    let remainder = value % scale;
    if remainder.is_zero() {
        return integer.to_string();
    }
    let fraction = format!("{remainder:0>width$}", width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    format!("{integer}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn as_decimal(ray_value: U256) -> Decimal {
        Decimal::from_str(&normalize(ray_value, RAY_DECIMALS)).unwrap()
    }

    #[test]
    fn test_ray_constant_is_ten_pow_27() {
        assert_eq!(RAY, U256::from(10u8).pow(U256::from(27u8)));
    }

    #[test]
    fn test_half_ray_is_half_of_ray() {
        assert_eq!(HALF_RAY + HALF_RAY, RAY);
    }

    #[test]
    fn test_ray_mul_identity() {
        assert_eq!(ray_mul(RAY, RAY), RAY);
        let x = U256::from(123_456_789_u64);
        assert_eq!(ray_mul(x, RAY), x);
        assert_eq!(ray_mul(U256::ZERO, RAY), U256::ZERO);
    }

    #[test]
    fn test_ray_mul_rounds_half_up() {
        // 1 * HALF_RAY is exactly 0.5 ulp: must round up to 1.
        assert_eq!(ray_mul(U256::from(1u8), HALF_RAY), U256::from(1u8));
        // 1 * 1 is far below 0.5 ulp: rounds down to 0.
        assert_eq!(ray_mul(U256::from(1u8), U256::from(1u8)), U256::ZERO);
    }

    #[test]
    fn test_ray_mul_saturates_instead_of_panicking() {
        let result = ray_mul(U256::MAX, U256::MAX);
        assert_eq!(result, U256::MAX / RAY);
    }

    #[test]
    fn test_ray_pow_basics() {
        assert_eq!(ray_pow(RAY, 0), RAY);
        assert_eq!(ray_pow(RAY, 1), RAY);
        assert_eq!(ray_pow(RAY, 31_536_000), RAY);
        let two_ray = RAY + RAY;
        assert_eq!(ray_pow(two_ray, 2), RAY * U256::from(4u8));
        assert_eq!(ray_pow(two_ray, 3), RAY * U256::from(8u8));
    }

    #[test]
    fn test_compounded_rate_zero_rate_is_zero() {
        assert_eq!(
            calculate_compounded_rate(U256::ZERO, SECONDS_PER_YEAR),
            U256::ZERO
        );
    }

    #[test]
    fn test_compounded_rate_five_percent_apr() {
        // 5% APR compounded per second ≈ 5.12711% APY (e^0.05 - 1).
        let rate = U256::from(50_000_000_000_000_000_000_000_000_u128);
        let apy = as_decimal(calculate_compounded_rate(rate, SECONDS_PER_YEAR));
        let expected = dec!(0.05127110);
        assert!(
            (apy - expected).abs() < dec!(0.0000001),
            "APY {apy} not within tolerance of {expected}"
        );
    }

    #[test]
    fn test_compounded_rate_monotone_in_rate() {
        let low = U256::from(10_000_000_000_000_000_000_000_000_u128);
        let high = U256::from(20_000_000_000_000_000_000_000_000_u128);
        assert!(
            calculate_compounded_rate(low, SECONDS_PER_YEAR)
                < calculate_compounded_rate(high, SECONDS_PER_YEAR)
        );
    }

    #[test]
    fn test_compounded_interest_zero_delta_is_one_ray() {
        let rate = U256::from(100_000_000_000_000_000_000_000_000_u128);
        assert_eq!(calculate_compounded_interest(rate, 1_700_000_000, 1_700_000_000), RAY);
    }

    #[test]
    fn test_compounded_interest_ten_percent_over_a_year() {
        // Binomial cutoff at the cubic term: 1 + 0.1 + 0.005 + ~0.000167.
        let rate = U256::from(100_000_000_000_000_000_000_000_000_u128);
        let start = 1_700_000_000_u64;
        let interest =
            as_decimal(calculate_compounded_interest(rate, start + SECONDS_PER_YEAR, start));
        let expected = dec!(1.1051672);
        assert!(
            (interest - expected).abs() < dec!(0.00001),
            "interest {interest} not within tolerance of {expected}"
        );
    }

    #[test]
    fn test_compounded_balance_zero_principal() {
        let rate = U256::from(100_000_000_000_000_000_000_000_000_u128);
        assert_eq!(
            compounded_balance(U256::ZERO, RAY, rate, 1_700_000_100, 1_700_000_000),
            U256::ZERO
        );
    }

    #[test]
    fn test_compounded_balance_zero_rate_applies_index_only() {
        let principal = U256::from(1_000u64);
        let index = RAY + RAY; // 2.0
        assert_eq!(
            compounded_balance(principal, index, U256::ZERO, 1_700_000_100, 1_700_000_000),
            U256::from(2_000u64)
        );
    }

    #[test]
    fn test_ten_pow() {
        assert_eq!(ten_pow(0), U256::from(1u8));
        assert_eq!(ten_pow(27), RAY);
        assert_eq!(ten_pow(200), U256::MAX);
    }

    #[test]
    fn test_normalize_whole_numbers() {
        assert_eq!(normalize(U256::ZERO, 18), "0");
        assert_eq!(normalize(U256::from(123u64), 0), "123");
        assert_eq!(normalize(U256::from(1_000_000u64), 6), "1");
    }

    #[test]
    fn test_normalize_fractions() {
        assert_eq!(normalize(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(normalize(U256::from(1_230_000u64), 6), "1.23");
        assert_eq!(normalize(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn test_normalize_trims_trailing_zeros_only_in_fraction() {
        assert_eq!(normalize(U256::from(10_000_000u64), 6), "10");
        assert_eq!(normalize(U256::from(10_100_000u64), 6), "10.1");
    }
}
