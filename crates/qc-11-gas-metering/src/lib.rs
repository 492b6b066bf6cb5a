//! # QC-11 Gas Metering - EVM Instruction Pricing
//!
//! **Subsystem ID:** 11
//! **Status:** Production-Ready (Phase 3)
//!
//! ## Purpose
//!
//! Decides, for every EVM instruction about to execute, how much gas it
//! costs. Covers the static cost of each opcode, the quadratic price of
//! growing linear memory, per-word copy and hashing costs, the
//! state-dependent prices of `SSTORE`, `CALL` and `SELFDESTRUCT`, and the
//! refund ledger settled at the end of a call.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | No silent wrap-around | `evm/math.rs` - every cost goes through checked arithmetic |
//! | Memory billed once | `evm/memory.rs` - `expansion_cost()` charges only the increment |
//! | Gas charged before execution | `evm/meter.rs` - `charge_instruction()` |
//! | Refund capped on settlement | `evm/gas.rs` - `calculate_refund()` |
//!
//! ## Outbound Dependencies
//!
//! | Subsystem | Trait | Purpose |
//! |-----------|-------|---------|
//! | 4 (State Mgmt) | `CallContext` | Account existence and storage reads |
//!
//! ## EVM Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Math | `evm/math.rs` | Overflow-flagged u64 arithmetic |
//! | Stack | `evm/stack.rs` | 1024-item operand stack |
//! | Memory | `evm/memory.rs` | Expansion cost & refund ledger |
//! | Memory size | `evm/memory_size.rs` | Per-opcode memory extent |
//! | Gas | `evm/gas.rs` | Cost constants & dynamic gas functions |
//! | Table | `evm/table.rs` | 256-entry instruction cost table |
//! | Meter | `evm/meter.rs` | Per-call gas budget |
//!
//! ## Usage Example
//!
//! ```
//! use qc_11_gas_metering::prelude::*;
//!
//! let ctx = InMemoryContext::new();
//! let mut meter = GasMeter::new(MeterConfig::with_gas_limit(100_000)).unwrap();
//! let mut mem = MemoryAccessor::new();
//!
//! // MSTORE at offset 0 grows memory by one word
//! let stack = Stack::from_top([U256::zero(), U256::from(0xFF)]).unwrap();
//! let charged = meter
//!     .charge_instruction(Opcode::MStore.as_byte(), &ctx, Address::ZERO, &stack, &mut mem)
//!     .unwrap();
//! assert_eq!(charged, 6);
//!
//! let settlement = meter.settle(&mem);
//! assert_eq!(settlement.gas_used, 6);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod evm;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::config::MeterConfig;
    pub use crate::domain::value_objects::{Address, StorageKey, StorageValue, U256};

    // Errors
    pub use crate::errors::GasError;

    // Ports
    pub use crate::ports::outbound::CallContext;

    // EVM components
    pub use crate::evm::{
        calculate_call_gas, calculate_refund, costs, dynamic_gas, expansion_cost, lookup,
        memory_gas_cost, required_memory_size, DynamicGas, GasMeter, InstructionCost, Memory,
        MemoryAccessor, MemoryShape, Opcode, Settlement, Stack,
    };

    // Adapters
    pub use crate::adapters::InMemoryContext;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID for IPC.
pub const SUBSYSTEM_ID: u8 = 11;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Gas Metering";

// =============================================================================
// TESTS
// =============================================================================
