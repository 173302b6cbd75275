//! Liquidity pool
//!
//! Depositors receive non-transferable shares that track a proportional
//! claim on the pool's balance. Part of that balance can be locked against
//! open options; locked capital cannot be withdrawn.

mod shares;
mod types;

pub use shares::Pool;
pub use types::{PoolError, PoolParams, PoolSnapshot, PoolStatus, WithdrawReceipt};
