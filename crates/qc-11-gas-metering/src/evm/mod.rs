//! # EVM Gas Engine
//!
//! Prices EVM instructions before they execute.
//!
//! ## Components
//!
//! - `math.rs` - Overflow-reporting arithmetic
//! - `stack.rs` - Operand stack and depth-indexed reads
//! - `memory_size.rs` - Memory extent of an instruction
//! - `memory.rs` - Linear memory, expansion cost and refund ledger
//! - `gas.rs` - Cost constants and dynamic gas functions
//! - `opcodes.rs` - Opcode definitions
//! - `table.rs` - Per-opcode cost records
//! - `meter.rs` - Gas budget of a call frame

pub mod gas;
pub mod math;
pub mod memory;
pub mod memory_size;
pub mod meter;
pub mod opcodes;
pub mod stack;
pub mod table;

pub use gas::*;
pub use math::*;
pub use memory::*;
pub use memory_size::*;
pub use meter::*;
pub use opcodes::*;
pub use stack::*;
pub use table::*;
