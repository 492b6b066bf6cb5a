//! # EVM Stack
//!
//! Operand stack as seen by the gas engine.
//! At most 1024 elements. Pricing only ever reads it.

use crate::domain::value_objects::U256;
use crate::errors::GasError;

/// Maximum stack depth.
pub const MAX_STACK_SIZE: usize = 1024;

/// EVM stack implementation.
///
/// A LIFO stack holding 256-bit values. Maximum 1024 elements.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    data: Vec<U256>,
}

impl Stack {
    /// Creates a new empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(64), // Pre-allocate for common case
        }
    }

    /// Builds a stack from operands listed top first.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if more than 1024 operands are given.
    pub fn from_top<I>(operands: I) -> Result<Self, GasError>
    where
        I: IntoIterator<Item = U256>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut stack = Self::new();
        for value in operands.into_iter().rev() {
            stack.push(value)?;
        }
        Ok(stack)
    }

    /// Returns the number of elements on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Push a value onto the stack.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push(&mut self, value: U256) -> Result<(), GasError> {
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(GasError::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Peek at the numeric value at a given depth (0 = top).
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the depth is out of bounds.
    pub fn peek_uint(&self, depth: usize) -> Result<U256, GasError> {
        if depth >= self.data.len() {
            return Err(GasError::StackUnderflow);
        }
        Ok(self.data[self.data.len() - 1 - depth])
    }

    /// Peek at a given depth as a 32-byte big-endian word.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the depth is out of bounds.
    pub fn peek_word(&self, depth: usize) -> Result<[u8; 32], GasError> {
        let value = self.peek_uint(depth)?;
        let mut word = [0u8; 32];
        value.to_big_endian(&mut word);
        Ok(word)
    }
}

// =============================================================================
// TESTS
// =============================================================================
