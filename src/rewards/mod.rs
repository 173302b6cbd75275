//! Utilization rewards collaborator
//!
//! Fire-and-forget accounting hooks called by options. Callers are
//! authenticated through the factory's option registry.

mod tracker;

pub use tracker::{RewardTracker, UserRewards};

use crate::types::{Address, Amount, ErrorKind};
use thiserror::Error;

/// Rewards errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardsError {
    /// Caller is not an option registered with the factory
    #[error("Caller {0} is not a registered option")]
    NotAnOption(Address),
}

impl RewardsError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::AccessDenied
    }
}

/// Trait for utilization reward accounting
pub trait UtilizationRewards: Send + Sync {
    /// Native-denominated execution cost incurred by `user`
    fn track_gas(&mut self, option: &Address, user: &Address, amount: Amount) -> Result<(), RewardsError>;
    /// `user` provided liquidity
    fn track_participation(&mut self, option: &Address, user: &Address) -> Result<(), RewardsError>;
    /// `user` kept liquidity in the pool for `blocks_elapsed` blocks
    fn track_option_rewards(
        &mut self,
        option: &Address,
        user: &Address,
        blocks_elapsed: u64,
    ) -> Result<(), RewardsError>;
}

/// Log and drop a failed accounting hook; rewards never revert the caller
pub(crate) fn report(hook: &'static str, result: Result<(), RewardsError>) {
    if let Err(e) = result {
        tracing::warn!(hook, error = %e, "Utilization rewards hook failed");
    }
}
