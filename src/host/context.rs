//! Per-call execution context

use crate::types::{Address, Amount};
use chrono::{DateTime, Utc};

/// Who is calling, when, and with how much attached native value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Calling account
    pub caller: Address,
    /// Host timestamp of the call
    pub now: DateTime<Utc>,
    /// Host block height of the call
    pub block: u64,
    /// Native value attached to the call
    pub value: Amount,
}

impl CallContext {
    pub fn new(caller: impl Into<Address>, now: DateTime<Utc>) -> Self {
        Self {
            caller: caller.into(),
            now,
            block: 0,
            value: 0,
        }
    }

    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }

    pub fn at_block(mut self, block: u64) -> Self {
        self.block = block;
        self
    }
}
