//! Host environment
//!
//! Everything the pool and option book consume from outside: asset
//! balances, the price oracle, utilization rewards and the event journal.

mod chain;
mod context;
mod events;
mod ledger;

pub use chain::Chain;
pub use context::CallContext;
pub use events::Event;
pub use ledger::{AssetLedger, LedgerError, MemoryLedger};

use crate::oracle::PriceOracle;
use crate::rewards::UtilizationRewards;

/// Collaborators available to a state-mutating call
pub trait Host {
    fn ledger(&self) -> &dyn AssetLedger;
    fn ledger_mut(&mut self) -> &mut dyn AssetLedger;
    fn oracle(&self) -> &dyn PriceOracle;
    fn rewards_mut(&mut self) -> &mut dyn UtilizationRewards;
    /// Append to the event journal
    fn emit(&mut self, event: Event);
}
