//! # EVM Memory
//!
//! Linear memory of a call frame together with its gas bookkeeping.
//! Memory is a byte-addressable, expandable array with gas costs for expansion.

use crate::errors::GasError;
use crate::evm::gas::costs;
use crate::evm::math::{checked_add, word_size, WORD_SIZE};

/// Largest size whose word count can still be squared in 64 bits.
pub const MAX_MEMORY_GAS_SIZE: u64 = 0x1F_FFFF_FFE0;

/// Growable byte buffer backing a call frame's memory.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates a new empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Returns the current memory size in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns true if memory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the memory size in 32-byte words.
    #[must_use]
    pub fn word_size(&self) -> u64 {
        word_size(self.len())
    }

    /// Grows memory to at least `size` bytes, rounded up to a word boundary.
    /// Memory never shrinks.
    ///
    /// # Errors
    ///
    /// Returns `MemoryLimitExceeded` if the rounded size exceeds `max`.
    pub fn resize(&mut self, size: u64, max: u64) -> Result<(), GasError> {
        if size <= self.len() {
            return Ok(());
        }
        let new_size = word_size(size).saturating_mul(WORD_SIZE);
        if new_size > max {
            return Err(GasError::MemoryLimitExceeded {
                requested: new_size,
                max,
            });
        }
        let new_size = usize::try_from(new_size).map_err(|_| GasError::MemoryLimitExceeded {
            requested: new_size,
            max,
        })?;
        self.data.resize(new_size, 0);
        Ok(())
    }
}

/// Memory with the gas already charged for it and the refund ledger.
///
/// Owned by exactly one in-flight call frame. `last_gas_cost` only ever
/// grows and equals `memory_gas_cost` at the buffer's current word size.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccessor {
    memory: Memory,
    last_gas_cost: u64,
    refund: u64,
}

impl MemoryAccessor {
    /// Creates an empty accessor for a new call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing buffer whose expansion has already been paid for.
    #[must_use]
    pub fn with_memory(memory: Memory) -> Self {
        let last_gas_cost = memory_gas_cost(memory.word_size());
        Self {
            memory,
            last_gas_cost,
            refund: 0,
        }
    }

    /// Current byte capacity of the buffer.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.memory.len()
    }

    /// Returns true if nothing has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Cumulative quadratic cost charged so far.
    #[must_use]
    pub fn last_gas_cost(&self) -> u64 {
        self.last_gas_cost
    }

    /// Refund accumulated during the call.
    #[must_use]
    pub fn refund(&self) -> u64 {
        self.refund
    }

    /// Credits the refund ledger.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` instead of truncating the refund.
    pub fn add_refund(&mut self, amount: u64) -> Result<(), GasError> {
        let (refund, overflow) = checked_add(self.refund, amount);
        if overflow {
            return Err(GasError::ArithmeticOverflow);
        }
        self.refund = refund;
        Ok(())
    }

    /// Underlying buffer.
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable access to the underlying buffer.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Gas bookkeeping to roll back to if the current instruction fails.
    pub(crate) fn checkpoint(&self) -> MemoryCheckpoint {
        MemoryCheckpoint {
            last_gas_cost: self.last_gas_cost,
            refund: self.refund,
        }
    }

    /// Discards bookkeeping changes made since `checkpoint`. The buffer is
    /// only grown after a successful charge, so it is left as is.
    pub(crate) fn revert_to(&mut self, checkpoint: MemoryCheckpoint) {
        self.last_gas_cost = checkpoint.last_gas_cost;
        self.refund = checkpoint.refund;
    }

    /// Consumes the accessor, returning the final refund.
    #[must_use]
    pub fn into_refund(self) -> u64 {
        self.refund
    }
}

/// Saved `last_gas_cost` and refund of a `MemoryAccessor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MemoryCheckpoint {
    last_gas_cost: u64,
    refund: u64,
}

/// Total memory cost for `words` words.
///
/// Cost = (`words^2` / 512) + (3 * `words`). Only valid for word counts
/// derived from sizes up to `MAX_MEMORY_GAS_SIZE`.
#[must_use]
pub const fn memory_gas_cost(words: u64) -> u64 {
    words * words / costs::QUAD_COEFF_DIV + words * costs::MEMORY_GAS_PER_WORD
}

/// Incremental cost of growing `mem` to `new_size` bytes.
///
/// Only the difference to what was already charged is returned, so repeated
/// expansions of the same buffer are never billed twice.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if `new_size` exceeds `MAX_MEMORY_GAS_SIZE`.
pub fn expansion_cost(mem: &mut MemoryAccessor, new_size: u64) -> Result<u64, GasError> {
    if new_size == 0 {
        return Ok(0);
    }
    if new_size > MAX_MEMORY_GAS_SIZE {
        return Err(GasError::ArithmeticOverflow);
    }
    let words = word_size(new_size);
    let new_size = words * WORD_SIZE;

    if new_size <= mem.len() {
        return Ok(0);
    }

    let total_fee = memory_gas_cost(words);
    // Sizes already charged but not yet allocated cost nothing again.
    if total_fee <= mem.last_gas_cost {
        return Ok(0);
    }
    let fee = total_fee - mem.last_gas_cost;
    mem.last_gas_cost = total_fee;
    Ok(fee)
}

// =============================================================================
// TESTS
// =============================================================================
