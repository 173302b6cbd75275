//! In-memory host used by tests and the simulator

use super::{AssetLedger, Event, Host, MemoryLedger};
use crate::factory::OptionRegistry;
use crate::oracle::{ManualOracle, PriceOracle};
use crate::rewards::{RewardTracker, UtilizationRewards};

/// A single-threaded in-memory chain
pub struct Chain {
    pub ledger: MemoryLedger,
    pub oracle: ManualOracle,
    pub rewards: RewardTracker,
    pub events: Vec<Event>,
}

impl Chain {
    /// Create a chain whose rewards tracker authenticates against `registry`
    pub fn new(registry: OptionRegistry, round_tolerance: u64) -> Self {
        Self {
            ledger: MemoryLedger::new(),
            oracle: ManualOracle::new(round_tolerance),
            rewards: RewardTracker::new(registry),
            events: vec![],
        }
    }

    /// Drain the event journal
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl Host for Chain {
    fn ledger(&self) -> &dyn AssetLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut dyn AssetLedger {
        &mut self.ledger
    }

    fn oracle(&self) -> &dyn PriceOracle {
        &self.oracle
    }

    fn rewards_mut(&mut self) -> &mut dyn UtilizationRewards {
        &mut self.rewards
    }

    fn emit(&mut self, event: Event) {
        tracing::debug!(?event, "Event");
        self.events.push(event);
    }
}
