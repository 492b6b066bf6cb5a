//! # Safe Arithmetic
//!
//! Overflow-reporting 64-bit arithmetic used by every cost computation.
//! Each function returns the (possibly wrapped) result together with an
//! overflow flag; a set flag is always fatal and the numeric result must not
//! be used.

use crate::domain::value_objects::U256;

/// Word size in bytes (32 bytes = 256 bits).
pub const WORD_SIZE: u64 = 32;

/// `x + y`, flagging overflow when the sum exceeds `u64::MAX`.
#[must_use]
pub const fn checked_add(x: u64, y: u64) -> (u64, bool) {
    x.overflowing_add(y)
}

/// `x - y`, flagging overflow when `x < y`.
#[must_use]
pub const fn checked_sub(x: u64, y: u64) -> (u64, bool) {
    x.overflowing_sub(y)
}

/// `x * y`, flagging overflow when the product exceeds `u64::MAX`.
#[must_use]
pub const fn checked_mul(x: u64, y: u64) -> (u64, bool) {
    if x == 0 || y == 0 {
        return (0, false);
    }
    (x.wrapping_mul(y), y > u64::MAX / x)
}

/// Number of 32-byte words needed to hold `size` bytes.
///
/// Saturates to `u64::MAX / 32 + 1` instead of wrapping, so any per-word
/// cost multiplied against it overflows and is rejected.
#[must_use]
pub const fn word_size(size: u64) -> u64 {
    if size > u64::MAX - (WORD_SIZE - 1) {
        return u64::MAX / WORD_SIZE + 1;
    }
    size.div_ceil(WORD_SIZE)
}

/// Narrows a stack word to `u64`, flagging overflow if it does not fit.
#[must_use]
pub fn u256_to_u64(value: U256) -> (u64, bool) {
    (value.low_u64(), value.bits() > 64)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add() {
        assert_eq!(checked_add(1, 2), (3, false));
        assert_eq!(checked_add(u64::MAX, 0), (u64::MAX, false));
        assert_eq!(checked_add(u64::MAX, 1), (0, true));
    }

    #[test]
    fn test_checked_sub() {
        assert_eq!(checked_sub(5, 3), (2, false));
        assert_eq!(checked_sub(3, 3), (0, false));
        assert_eq!(checked_sub(0, 1), (u64::MAX, true));
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(checked_mul(0, u64::MAX), (0, false));
        assert_eq!(checked_mul(u64::MAX, 0), (0, false));
        assert_eq!(checked_mul(6, 7), (42, false));
        assert_eq!(checked_mul(u64::MAX, 1), (u64::MAX, false));
        assert_eq!(checked_mul(u64::MAX, 2), (u64::MAX.wrapping_mul(2), true));
        assert_eq!(checked_mul(1 << 32, 1 << 32), (0, true));
    }

    #[test]
    fn test_word_size() {
        assert_eq!(word_size(0), 0);
        assert_eq!(word_size(1), 1);
        assert_eq!(word_size(32), 1);
        assert_eq!(word_size(33), 2);
        assert_eq!(word_size(u64::MAX - 31), u64::MAX / 32);
        assert_eq!(word_size(u64::MAX - 32), u64::MAX / 32);
    }

    #[test]
    fn test_word_size_near_max_does_not_wrap() {
        // Largest size below the saturation guard
        for size in (u64::MAX - 63)..=(u64::MAX - 31) {
            assert_eq!(word_size(size), u64::MAX / 32, "size {size}");
        }
    }

    #[test]
    fn test_word_size_saturates() {
        let sentinel = u64::MAX / 32 + 1;
        assert_eq!(word_size(u64::MAX), sentinel);
        assert_eq!(word_size(u64::MAX - 30), sentinel);
        // Scaling the sentinel back to bytes must overflow.
        assert!(checked_mul(sentinel, WORD_SIZE).1);
    }

    #[test]
    fn test_u256_to_u64() {
        assert_eq!(u256_to_u64(U256::from(7)), (7, false));
        assert_eq!(u256_to_u64(U256::from(u64::MAX)), (u64::MAX, false));
        assert!(u256_to_u64(U256::from(u64::MAX) + 1).1);
        assert!(u256_to_u64(U256::MAX).1);
    }
}
