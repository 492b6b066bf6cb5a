//! # Driven Ports (SPI - Outbound)
//!
//! The read-only view of the surrounding call frame that the gas engine
//! needs to pick cost tiers. The engine never mutates account or storage
//! state through this port.

use crate::domain::value_objects::{Address, StorageKey, StorageValue};

// =============================================================================
// CALL CONTEXT (Subsystem 4 Dependency)
// =============================================================================

/// Read-only ledger queries used while pricing an instruction.
///
/// Calls are synchronous: pricing happens strictly in program order with no
/// suspension point.
pub trait CallContext {
    /// Check if account exists.
    ///
    /// Decides the new-account surcharge of CALL and SELFDESTRUCT.
    fn account_exists(&self, address: Address) -> bool;

    /// Get the current storage value.
    ///
    /// # Returns
    ///
    /// * `StorageValue` - Value at slot (zero if never written)
    fn get_storage(&self, address: Address, key: StorageKey) -> StorageValue;
}

impl<C: CallContext + ?Sized> CallContext for &C {
    fn account_exists(&self, address: Address) -> bool {
        (**self).account_exists(address)
    }

    fn get_storage(&self, address: Address, key: StorageKey) -> StorageValue {
        (**self).get_storage(address, key)
    }
}
