//! UiPoolDataProvider Contract Interaction - Aggregated Reserve Reads
//!
//! Implements the `PoolDataSource` port against Aave's
//! `UiPoolDataProvider` periphery contract. One `getReservesData` call
//! returns every reserve row of a pool plus the base currency metadata,
//! so a snapshot is internally consistent. Contract addresses come from
//! the chain's configuration entry.

use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::{ChainConfig, ChainId};
use crate::domain::reserve::{BaseCurrencyData, PoolReserves, RawReserve};
use crate::error::{MarketDataError, Result};
use crate::ports::pool_source::PoolDataSource;

use super::provider::ReadOnlyProvider;

sol! {
    /// One reserve row as returned by `UiPoolDataProvider.getReservesData`.
    ///
    /// Field order mirrors the deployed v3 periphery contract; ABI
    /// decoding depends on it.
    #[derive(Debug, Default)]
    struct AggregatedReserveData {
        address underlyingAsset;
        string name;
        string symbol;
        uint256 decimals;
        uint256 baseLTVasCollateral;
        uint256 reserveLiquidationThreshold;
        uint256 reserveLiquidationBonus;
        uint256 reserveFactor;
        bool usageAsCollateralEnabled;
        bool borrowingEnabled;
        bool stableBorrowRateEnabled;
        bool isActive;
        bool isFrozen;
        uint128 liquidityIndex;
        uint128 variableBorrowIndex;
        uint128 liquidityRate;
        uint128 variableBorrowRate;
        uint128 stableBorrowRate;
        uint40 lastUpdateTimestamp;
        address aTokenAddress;
        address stableDebtTokenAddress;
        address variableDebtTokenAddress;
        address interestRateStrategyAddress;
        uint256 availableLiquidity;
        uint256 totalPrincipalStableDebt;
        uint256 averageStableRate;
        uint256 stableDebtLastUpdateTimestamp;
        uint256 totalScaledVariableDebt;
        uint256 priceInMarketReferenceCurrency;
        address priceOracle;
        uint256 variableRateSlope1;
        uint256 variableRateSlope2;
        uint256 stableRateSlope1;
        uint256 stableRateSlope2;
        uint256 baseStableBorrowRate;
        uint256 baseVariableBorrowRate;
        uint256 optimalUsageRatio;
        bool isPaused;
        bool isSiloedBorrowing;
        uint128 accruedToTreasury;
        uint128 unbacked;
        uint128 isolationModeTotalDebt;
        bool flashLoanEnabled;
        uint256 debtCeiling;
        uint256 debtCeilingDecimals;
        uint8 eModeCategoryId;
        uint256 borrowCap;
        uint256 supplyCap;
        uint16 eModeLtv;
        uint16 eModeLiquidationThreshold;
        uint16 eModeLiquidationBonus;
        address eModePriceSource;
        string eModeLabel;
        bool borrowableInIsolation;
    }

    /// Market reference currency metadata for the whole pool.
    #[derive(Debug, Default)]
    struct BaseCurrencyInfo {
        uint256 marketReferenceCurrencyUnit;
        int256 marketReferenceCurrencyPriceInUsd;
        int256 networkBaseTokenPriceInUsd;
        uint8 networkBaseTokenPriceDecimals;
    }

    function getReservesData(address provider) external view returns (AggregatedReserveData[] memory reservesData, BaseCurrencyInfo memory baseCurrencyInfo);
}

/// Reads pool reserves through the `UiPoolDataProvider` contract.
///
/// Stateless: the target chain (RPC endpoint and contract addresses)
/// arrives with every call, so one instance serves all configured
/// chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiPoolDataSource;

impl UiPoolDataSource {
    /// Create a stateless pool data source.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PoolDataSource for UiPoolDataSource {
    /// Fetch every reserve row plus base currency info in one eth_call.
    #[instrument(skip_all, fields(chain = %chain.name))]
    async fn fetch_reserves(&self, chain: &ChainConfig) -> Result<PoolReserves> {
        let provider = ReadOnlyProvider::connect(chain)?;

        let call = getReservesDataCall {
            provider: chain.pool_address_provider,
        };
        let calldata = Bytes::from(call.abi_encode());

        let request = TransactionRequest::default()
            .to(chain.ui_pool_data_provider)
            .input(calldata.into());

        let raw = provider.inner().call(&request).await?;

        let getReservesDataReturn {
            reservesData: rows,
            baseCurrencyInfo: base_info,
        } = getReservesDataCall::abi_decode_returns(&raw, true)?;

        let base_currency = humanize_base_currency(&base_info)?;
        let reserves = rows
            .iter()
            .map(|row| humanize_reserve(chain, row))
            .collect::<Result<Vec<_>>>()?;

        debug!(reserves = reserves.len(), "Fetched pool reserves");

        Ok(PoolReserves {
            reserves,
            base_currency,
        })
    }
}

/// Reserve identifier: chain id plus the lowercased asset and address
/// provider, matching the id scheme of Aave's own interface clients.
fn reserve_id(chain: ChainId, asset: Address, pool_address_provider: Address) -> String {
    format!("{chain}-{asset}-{pool_address_provider}").to_lowercase()
}

fn humanize_reserve(chain: &ChainConfig, row: &AggregatedReserveData) -> Result<RawReserve> {
    // Token decimals arrive as uint256 but anything above u8 range is a
    // corrupt row, not a real ERC-20.
    let decimals = u8::try_from(row.decimals).map_err(|_| {
        MarketDataError::MalformedReserve(format!(
            "reserve {} reports {} decimals",
            row.symbol, row.decimals
        ))
    })?;

    Ok(RawReserve {
        id: reserve_id(chain.chain_id, row.underlyingAsset, chain.pool_address_provider),
        underlying_asset: row.underlyingAsset,
        name: row.name.clone(),
        symbol: row.symbol.clone(),
        decimals,
        liquidity_rate: row.liquidityRate,
        variable_borrow_rate: row.variableBorrowRate,
        variable_borrow_index: row.variableBorrowIndex,
        last_update_timestamp: row.lastUpdateTimestamp.to::<u64>(),
        available_liquidity: row.availableLiquidity,
        total_scaled_variable_debt: row.totalScaledVariableDebt,
        price_in_market_reference_currency: row.priceInMarketReferenceCurrency,
        usage_as_collateral_enabled: row.usageAsCollateralEnabled,
        borrowing_enabled: row.borrowingEnabled,
        is_frozen: row.isFrozen,
        is_paused: row.isPaused,
        debt_ceiling: row.debtCeiling,
        a_token_address: row.aTokenAddress,
        variable_debt_token_address: row.variableDebtTokenAddress,
    })
}

fn humanize_base_currency(info: &BaseCurrencyInfo) -> Result<BaseCurrencyData> {
    if info.marketReferenceCurrencyPriceInUsd.is_negative() {
        return Err(MarketDataError::MalformedReserve(
            "negative market reference currency price".to_string(),
        ));
    }

    Ok(BaseCurrencyData {
        market_reference_currency_decimals: reference_currency_decimals(
            info.marketReferenceCurrencyUnit,
        ),
        market_reference_price_in_usd: info.marketReferenceCurrencyPriceInUsd.into_raw(),
    })
}

/// Decimal count of the reference currency, derived from its unit.
///
/// The contract reports the unit as a power of ten (1e8 for USD-based
/// markets), so the digit count minus one is the decimal count.
fn reference_currency_decimals(unit: U256) -> u8 {
    (unit.to_string().len() - 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::aliases::U40;
    use alloy::primitives::{I256, address, keccak256};

    fn polygon() -> ChainConfig {
        ChainConfig {
            name: "polygon".to_string(),
            chain_id: ChainId::POLYGON,
            rpc_url: "https://polygon-rpc.com".to_string(),
            ui_pool_data_provider: address!("C69728f11E9E6127733751c8410432913123acf1"),
            pool_address_provider: address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
        }
    }

    fn usdc_row() -> AggregatedReserveData {
        AggregatedReserveData {
            underlyingAsset: address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
            name: "USD Coin".to_string(),
            symbol: "USDC".to_string(),
            decimals: U256::from(6u8),
            usageAsCollateralEnabled: true,
            borrowingEnabled: true,
            liquidityRate: 12_345,
            variableBorrowRate: 67_890,
            variableBorrowIndex: 1_000_000_000_000_000_000_000_000_000u128,
            lastUpdateTimestamp: U40::from(1_700_000_000u64),
            aTokenAddress: address!("625E7708f30cA75bfd92586e17077590C60eb4cD"),
            variableDebtTokenAddress: address!("FCCf3cAbbe80101232d343252614b6A3eE81C989"),
            availableLiquidity: U256::from(5_000_000u64),
            totalScaledVariableDebt: U256::from(2_000_000u64),
            priceInMarketReferenceCurrency: U256::from(100_000_000u64),
            ..Default::default()
        }
    }

    #[test]
    fn test_selector_matches_contract_signature() {
        let expected = &keccak256(b"getReservesData(address)")[..4];
        assert_eq!(&getReservesDataCall::SELECTOR[..], expected);
    }

    #[test]
    fn test_humanize_reserve_lowercases_id() {
        let reserve = humanize_reserve(&polygon(), &usdc_row()).unwrap();
        assert_eq!(
            reserve.id,
            "137-0x2791bca1f2de4661ed88a30c99a7a9449aa84174-0xa97684ead0e402dc232d5a977953df7ecbab3cdb"
        );
    }

    #[test]
    fn test_humanize_reserve_carries_fields() {
        let reserve = humanize_reserve(&polygon(), &usdc_row()).unwrap();
        assert_eq!(reserve.symbol, "USDC");
        assert_eq!(reserve.decimals, 6);
        assert_eq!(reserve.liquidity_rate, 12_345);
        assert_eq!(reserve.variable_borrow_rate, 67_890);
        assert_eq!(reserve.last_update_timestamp, 1_700_000_000);
        assert_eq!(reserve.available_liquidity, U256::from(5_000_000u64));
        assert!(reserve.usage_as_collateral_enabled);
        assert!(reserve.borrowing_enabled);
        assert!(!reserve.is_frozen);
        assert!(!reserve.is_paused);
    }

    #[test]
    fn test_humanize_reserve_rejects_oversized_decimals() {
        let mut row = usdc_row();
        row.decimals = U256::from(300u64);
        let err = humanize_reserve(&polygon(), &row).unwrap_err();
        assert!(matches!(err, MarketDataError::MalformedReserve(_)));
        assert!(err.to_string().contains("USDC"));
    }

    #[test]
    fn test_humanize_base_currency_derives_decimals() {
        let info = BaseCurrencyInfo {
            marketReferenceCurrencyUnit: U256::from(100_000_000u64),
            marketReferenceCurrencyPriceInUsd: I256::from_raw(U256::from(100_000_000u64)),
            ..Default::default()
        };
        let base = humanize_base_currency(&info).unwrap();
        assert_eq!(base.market_reference_currency_decimals, 8);
        assert_eq!(base.market_reference_price_in_usd, U256::from(100_000_000u64));
    }

    #[test]
    fn test_humanize_base_currency_rejects_negative_price() {
        let info = BaseCurrencyInfo {
            marketReferenceCurrencyUnit: U256::from(100_000_000u64),
            marketReferenceCurrencyPriceInUsd: I256::MINUS_ONE,
            ..Default::default()
        };
        let err = humanize_base_currency(&info).unwrap_err();
        assert!(matches!(err, MarketDataError::MalformedReserve(_)));
    }

    #[test]
    fn test_reference_currency_decimals_handles_unit() {
        assert_eq!(reference_currency_decimals(U256::from(1u8)), 0);
        assert_eq!(reference_currency_decimals(U256::from(100_000_000u64)), 8);
        assert_eq!(
            reference_currency_decimals(U256::from(10u64).pow(U256::from(18u64))),
            18
        );
    }
}
