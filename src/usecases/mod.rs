//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the crate's read operations. Each use case is a self-contained
//! business operation.
//!
//! Use cases:
//! - `MarketDataClient`: Formatted reserve reads and market assembly

pub mod markets;

pub use markets::MarketDataClient;
