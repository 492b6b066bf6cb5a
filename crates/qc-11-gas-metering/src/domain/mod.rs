//! # Domain Layer (Inner Hexagon)
//!
//! Pure value types and configuration for gas metering.
//! NO I/O, NO async.

pub mod config;
pub mod value_objects;

pub use config::*;
pub use value_objects::*;
