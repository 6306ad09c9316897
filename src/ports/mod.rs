//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `PoolDataSource`: Aggregated on-chain reserve reads
//! - `MarketDiagnostics`: Out-of-band permit capability reporting

pub mod diagnostics;
pub mod pool_source;
