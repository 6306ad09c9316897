//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (blockchain RPC, structured logging). Each
//! sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `chain`: On-chain pool reads via alloy-rs
//! - `diagnostics`: Permit gap reporting via tracing

pub mod chain;
pub mod diagnostics;
