//! Aave Market Data - Library Root
//!
//! Read-only client for Aave V3 lending markets: one aggregated
//! on-chain read per pool, pure reserve formatting, and market
//! assembly with permit annotations. Re-exports all modules for
//! integration tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod usecases;

pub use config::{AppConfig, ChainId};
pub use error::MarketDataError;
pub use usecases::MarketDataClient;
