//! Price oracle
//!
//! Round-indexed prices per asset. Options read the latest round when
//! opening and the historical price at the expiration round when settling.

mod manual;

pub use manual::ManualOracle;

use crate::types::{Asset, ErrorKind, Price, Round};
use thiserror::Error;

/// Oracle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No price source configured for the asset
    #[error("No oracle source for {0}")]
    NoSource(Asset),
    /// Round has not been reported (or is outside the tolerance window)
    #[error("No price for {asset} at round {round}")]
    MissingRound { asset: Asset, round: Round },
    /// Zero prices are rejected upstream
    #[error("Zero price reported for {0}")]
    ZeroPrice(Asset),
    /// Rounds must strictly increase
    #[error("Round {round} is not after latest round {latest}")]
    RoundNotIncreasing { round: Round, latest: Round },
}

impl OracleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OracleError::NoSource(_) => ErrorKind::Misconfiguration,
            OracleError::ZeroPrice(_) => ErrorKind::InvalidAmount,
            OracleError::MissingRound { .. } | OracleError::RoundNotIncreasing { .. } => {
                ErrorKind::StateViolation
            }
        }
    }
}

/// Trait for price oracle implementations
pub trait PriceOracle: Send + Sync {
    /// Whether a price source is configured for `asset`
    fn has_source(&self, asset: &Asset) -> bool;
    /// Latest `(round, price)` for `asset`
    fn latest(&self, asset: &Asset) -> Result<(Round, Price), OracleError>;
    /// Historical price for `asset` at `round`
    ///
    /// Resolves to the first reported round in `round..=round + tolerance`.
    /// Settlement relies on the feed reporting at least once in every such
    /// window; positions expiring inside a wider gap cannot be completed.
    fn price_at(&self, asset: &Asset, round: Round) -> Result<Price, OracleError>;
    /// Number of rounds a historical lookup may slide forward
    fn round_tolerance(&self) -> u64;
}
