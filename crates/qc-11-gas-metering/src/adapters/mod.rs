//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters implement the outbound ports.

pub mod in_memory;

pub use in_memory::*;
