//! Shared set of option addresses created by the factory

use crate::types::Address;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle collaborators use to authenticate option callers
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    options: Arc<RwLock<HashSet<Address>>>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `address` belongs to an option created by the factory
    pub fn is_option(&self, address: &Address) -> bool {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(address)
    }

    pub(crate) fn register(&self, address: Address) {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address);
    }

    pub fn len(&self) -> usize {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
