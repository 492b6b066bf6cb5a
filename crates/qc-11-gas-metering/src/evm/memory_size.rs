//! # Memory Size Resolver
//!
//! Computes the highest byte offset an instruction will touch from its
//! operands, before the instruction runs.

use crate::errors::GasError;
use crate::evm::math::{checked_add, u256_to_u64};
use crate::evm::stack::Stack;

/// Which stack slots determine an instruction's memory footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemoryShape {
    /// Instruction does not touch memory.
    #[default]
    None,
    /// SHA3 input: offset 0, length 1.
    Sha3,
    /// LOG0..LOG4 data: offset 0, length 1.
    Log,
    /// RETURN / REVERT data: offset 0, length 1.
    Return,
    /// CALLDATACOPY destination: offset 0, length 2.
    CallDataCopy,
    /// CODECOPY / RETURNDATACOPY destination: offset 0, length 2.
    CodeCopy,
    /// EXTCODECOPY destination: offset 1, length 3.
    ExtCodeCopy,
    /// MLOAD / MSTORE: offset 0, 32 bytes.
    Word,
    /// MSTORE8: offset 0, 1 byte.
    Byte,
    /// CREATE init code: offset 1, length 2.
    Create,
    /// CREATE2 init code: offset 1, length 2.
    Create2,
    /// CALL / CALLCODE: arguments at 3/4, return data at 5/6.
    Call,
    /// DELEGATECALL / STATICCALL: arguments at 2/3, return data at 4/5.
    DelegateCall,
}

/// Resolves the memory extent an instruction requires.
///
/// Returns the size in bytes and an overflow flag. Stack underflow is an
/// error from the stack itself and is propagated unchanged.
///
/// # Errors
///
/// Returns `StackUnderflow` if a needed operand is missing.
pub fn required_memory_size(shape: MemoryShape, stack: &Stack) -> Result<(u64, bool), GasError> {
    match shape {
        MemoryShape::None => Ok((0, false)),
        MemoryShape::Sha3 | MemoryShape::Log | MemoryShape::Return => region(stack, 0, 1),
        MemoryShape::CallDataCopy | MemoryShape::CodeCopy => region(stack, 0, 2),
        MemoryShape::ExtCodeCopy => region(stack, 1, 3),
        MemoryShape::Word => fixed(stack, 0, 32),
        MemoryShape::Byte => fixed(stack, 0, 1),
        MemoryShape::Create | MemoryShape::Create2 => region(stack, 1, 2),
        MemoryShape::Call => call_regions(stack, (3, 4), (5, 6)),
        MemoryShape::DelegateCall => call_regions(stack, (2, 3), (4, 5)),
    }
}

/// Offset+length pair. A zero length touches no memory, whatever the offset.
fn region(stack: &Stack, offset_depth: usize, length_depth: usize) -> Result<(u64, bool), GasError> {
    let length = stack.peek_uint(length_depth)?;
    if length.is_zero() {
        return Ok((0, false));
    }
    let (length, length_overflow) = u256_to_u64(length);
    let (offset, offset_overflow) = u256_to_u64(stack.peek_uint(offset_depth)?);
    if length_overflow || offset_overflow {
        return Ok((0, true));
    }
    Ok(checked_add(offset, length))
}

/// Single offset plus a fixed width.
fn fixed(stack: &Stack, offset_depth: usize, width: u64) -> Result<(u64, bool), GasError> {
    let (offset, overflow) = u256_to_u64(stack.peek_uint(offset_depth)?);
    if overflow {
        return Ok((0, true));
    }
    Ok(checked_add(offset, width))
}

/// Largest extent of the argument and return regions of a call.
fn call_regions(
    stack: &Stack,
    args: (usize, usize),
    ret: (usize, usize),
) -> Result<(u64, bool), GasError> {
    let (args_size, args_overflow) = region(stack, args.0, args.1)?;
    if args_overflow {
        return Ok((0, true));
    }
    let (ret_size, ret_overflow) = region(stack, ret.0, ret.1)?;
    if ret_overflow {
        return Ok((0, true));
    }
    Ok((args_size.max(ret_size), false))
}

// =============================================================================
// TESTS
// =============================================================================
