//! In-memory reward tallies

use super::{RewardsError, UtilizationRewards};
use crate::factory::OptionRegistry;
use crate::types::{Address, Amount};
use std::collections::HashMap;

/// Accumulated accounting for one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRewards {
    /// Total reported gas cost
    pub gas: Amount,
    /// Number of participation events
    pub participations: u64,
    /// Total liquidity-blocks reported on withdrawal
    pub liquidity_blocks: u64,
}

/// Tallies reward accounting per user
pub struct RewardTracker {
    registry: OptionRegistry,
    users: HashMap<Address, UserRewards>,
}

impl RewardTracker {
    pub fn new(registry: OptionRegistry) -> Self {
        Self {
            registry,
            users: HashMap::new(),
        }
    }

    /// Tally for `user`, zeroed if never reported
    pub fn user(&self, user: &Address) -> UserRewards {
        self.users.get(user).cloned().unwrap_or_default()
    }

    fn authenticate(&self, option: &Address) -> Result<(), RewardsError> {
        if self.registry.is_option(option) {
            Ok(())
        } else {
            Err(RewardsError::NotAnOption(option.clone()))
        }
    }
}

impl UtilizationRewards for RewardTracker {
    fn track_gas(&mut self, option: &Address, user: &Address, amount: Amount) -> Result<(), RewardsError> {
        self.authenticate(option)?;
        let entry = self.users.entry(user.clone()).or_default();
        entry.gas = entry.gas.saturating_add(amount);
        Ok(())
    }

    fn track_participation(&mut self, option: &Address, user: &Address) -> Result<(), RewardsError> {
        self.authenticate(option)?;
        self.users.entry(user.clone()).or_default().participations += 1;
        Ok(())
    }

    fn track_option_rewards(
        &mut self,
        option: &Address,
        user: &Address,
        blocks_elapsed: u64,
    ) -> Result<(), RewardsError> {
        self.authenticate(option)?;
        let entry = self.users.entry(user.clone()).or_default();
        entry.liquidity_blocks = entry.liquidity_blocks.saturating_add(blocks_elapsed);
        Ok(())
    }
}
