//! Governance capability
//!
//! Each factory mints exactly one [`GovernanceCap`] at construction. The
//! capability is not `Clone` and cannot be built outside this crate, so
//! holding a reference to it is the only way to call restricted
//! operations on that factory or its options.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FACTORY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a factory instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactoryId(u64);

impl FactoryId {
    pub(crate) fn next() -> Self {
        Self(NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Proof of governance authority over one factory
#[derive(Debug)]
pub struct GovernanceCap {
    factory: FactoryId,
}

impl GovernanceCap {
    pub(crate) fn mint(factory: FactoryId) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> FactoryId {
        self.factory
    }

    /// Whether this capability governs `factory`
    pub fn authorizes(&self, factory: FactoryId) -> bool {
        self.factory == factory
    }
}
