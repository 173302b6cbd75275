//! Rate calculator types

use crate::option::Side;
use crate::types::{Amount, Bps, ErrorKind, Round, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rate calculator errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// Strategy payout is above the (imbalance-adjusted) size cap
    #[error("Payout {payout} exceeds maximum {maximum}")]
    PayoutExceedsMaximum { payout: Amount, maximum: Amount },
    /// Open exposure plus the new payout exceeds the utilization cap
    #[error("Utilization exceeded: {committed} committed, maximum {maximum}")]
    UtilizationExceeded { committed: Amount, maximum: Amount },
    /// Pending deposit larger than the reported pool balance
    #[error("Pending deposit {pending} exceeds pool balance {balance}")]
    PendingExceedsBalance { pending: Amount, balance: Amount },
    /// Limit or multiplier outside its valid range
    #[error("Invalid rate parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: Bps },
    /// Arithmetic overflow
    #[error("Rate calculation overflow")]
    Overflow,
}

impl RateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RateError::PayoutExceedsMaximum { .. } | RateError::UtilizationExceeded { .. } => {
                ErrorKind::CapacityExceeded
            }
            RateError::PendingExceedsBalance { .. } | RateError::Overflow => ErrorKind::InvalidAmount,
            RateError::InvalidParameter { .. } => ErrorKind::Misconfiguration,
        }
    }
}

/// Size and utilization caps shared by all strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Largest single payout as a fraction of the pool
    pub max_option_size_bps: Bps,
    /// Largest total open exposure as a fraction of the pool
    pub max_utilization_bps: Bps,
}

impl RateLimits {
    pub fn new(max_option_size_bps: Bps, max_utilization_bps: Bps) -> Result<Self, RateError> {
        let limits = Self {
            max_option_size_bps,
            max_utilization_bps,
        };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<(), RateError> {
        for (name, value) in [
            ("max_option_size_bps", self.max_option_size_bps),
            ("max_utilization_bps", self.max_utilization_bps),
        ] {
            if value == 0 || value as u128 > BPS_DENOMINATOR {
                return Err(RateError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            max_option_size_bps: 1_000,
            max_utilization_bps: 8_000,
        }
    }
}

/// Inputs to a rate calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRequest {
    /// Pool balance as currently reported
    pub pool_balance: Amount,
    /// Total locked reward of open calls
    pub open_calls: Amount,
    /// Total locked reward of open puts
    pub open_puts: Amount,
    /// Option notional
    pub amount: Amount,
    /// Option duration in oracle rounds
    pub rounds: Round,
    /// Which side is being opened
    pub side: Side,
    /// Part of `pool_balance` that arrived in the same call
    pub pending_deposit: Amount,
}
