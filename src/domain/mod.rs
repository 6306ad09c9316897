//! Domain layer - Core data model and rate math.
//!
//! This module contains the pure domain logic for the Aave market data
//! client. No external dependencies allowed here (hexagonal architecture
//! inner ring). All types are serializable and testable in isolation.

pub mod format;
pub mod market;
pub mod ray;
pub mod reserve;

// Re-export core types for convenience
pub use format::{current_timestamp, format_reserves};
pub use market::Market;
pub use reserve::{BaseCurrencyData, FormattedReserve, PoolReserves, RawReserve};
