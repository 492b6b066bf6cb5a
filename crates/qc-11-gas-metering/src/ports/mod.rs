//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the gas engine and the surrounding ledger.
//!
//! - **Driven Ports (Outbound)**: `CallContext`
//! - No concrete implementations in this module

pub mod outbound;

pub use outbound::*;
