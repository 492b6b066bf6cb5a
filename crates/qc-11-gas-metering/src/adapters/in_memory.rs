//! # In-Memory Call Context
//!
//! Map-backed `CallContext` for testing and tooling.
//! Production implementation reads from Subsystem 4 state.

use crate::domain::value_objects::{Address, StorageKey, StorageValue};
use crate::ports::outbound::CallContext;
use std::collections::{HashMap, HashSet};

/// In-memory ledger view for testing.
#[derive(Debug, Default, Clone)]
pub struct InMemoryContext {
    /// Existing accounts.
    accounts: HashSet<Address>,
    /// Storage.
    storage: HashMap<(Address, StorageKey), StorageValue>,
}

impl InMemoryContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account as existing.
    pub fn create_account(&mut self, address: Address) {
        self.accounts.insert(address);
    }

    /// Set storage value. Writing a slot also creates its account.
    pub fn set_storage_value(&mut self, address: Address, key: StorageKey, value: StorageValue) {
        self.accounts.insert(address);
        if value.is_zero() {
            self.storage.remove(&(address, key));
        } else {
            self.storage.insert((address, key), value);
        }
    }
}

impl CallContext for InMemoryContext {
    fn account_exists(&self, address: Address) -> bool {
        self.accounts.contains(&address)
    }

    fn get_storage(&self, address: Address, key: StorageKey) -> StorageValue {
        self.storage
            .get(&(address, key))
            .copied()
            .unwrap_or(StorageValue::ZERO)
    }
}

// =============================================================================
// TESTS
// =============================================================================
