//! # Error Types
//!
//! All error types for gas metering.

use thiserror::Error;

// =============================================================================
// GAS ERRORS
// =============================================================================

/// Errors that can occur while pricing an instruction.
///
/// Every variant is deterministic in (bytecode, stack, memory state), so none
/// of them is ever retried by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GasError {
    /// A checked add/sub/mul or memory size computation left the 64-bit range.
    #[error("gas uint64 overflow")]
    ArithmeticOverflow,

    /// The instruction costs more than the call has left.
    #[error("out of gas: required {required}, remaining {remaining}")]
    OutOfGas { required: u64, remaining: u64 },

    /// Operand read below the bottom of the stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// Stack overflow (>1024 items).
    #[error("stack overflow")]
    StackOverflow,

    /// Opcode with no entry in the instruction cost table.
    #[error("invalid opcode: 0x{0:02X}")]
    InvalidOpcode(u8),

    /// Memory growth would exceed the configured buffer limit.
    #[error("memory limit exceeded: {requested} > {max} bytes")]
    MemoryLimitExceeded { requested: u64, max: u64 },

    /// An earlier instruction of this call already failed.
    #[error("call already aborted")]
    CallAborted,
}

impl GasError {
    /// Returns true for arithmetic overflow.
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::ArithmeticOverflow)
    }
}

// =============================================================================
// TESTS
// =============================================================================
