//! Chain Adapters - On-chain Pool Data Access
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - Per-chain HTTP RPC provider construction
//! - Aggregated reserve reads through UiPoolDataProvider

pub mod provider;
pub mod ui_pool_data_provider;

pub use provider::ReadOnlyProvider;
pub use ui_pool_data_provider::UiPoolDataSource;
