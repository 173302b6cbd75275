//! Rate calculators
//!
//! Convert a requested option size into the reward the pool must lock,
//! bounded by a per-option size cap and a pool-wide utilization cap.
//! Strategies only decide the raw payout; the caps are shared.

mod fixed;
mod scaled;
mod types;

pub use fixed::FixedRateCalculator;
pub use scaled::RoundScaledCalculator;
pub use types::{RateError, RateLimits, RateRequest};

use crate::option::Side;
use crate::types::{apply_bps, Amount, Bps, Round, BPS_DENOMINATOR};

/// Trait for payout strategies
pub trait RateCalculator: Send + Sync {
    /// Short identifier used in events and logs
    fn name(&self) -> &'static str;

    /// Size and utilization caps
    fn limits(&self) -> RateLimits;

    /// Strategy payout on top of the notional
    fn payout(&self, amount: Amount, rounds: Round) -> Result<Amount, RateError>;

    /// Worst-case total payout per unit notional, in bps (10000 = 1x)
    fn max_multiplier_bps(&self) -> Bps;

    /// Largest notional whose worst-case payout fits in `available`
    fn max_amount(&self, available: Amount) -> Amount {
        match self.max_multiplier_bps() {
            0 => available,
            multiplier => available.saturating_mul(BPS_DENOMINATOR) / multiplier as u128,
        }
    }

    /// Reward to lock for `request`: notional plus capped payout
    fn calculate_rate(&self, request: &RateRequest) -> Result<Amount, RateError> {
        let balance = request
            .pool_balance
            .checked_sub(request.pending_deposit)
            .ok_or(RateError::PendingExceedsBalance {
                pending: request.pending_deposit,
                balance: request.pool_balance,
            })?;
        let limits = self.limits();

        let max_size = apply_bps(balance, limits.max_option_size_bps).ok_or(RateError::Overflow)?;
        let (same_side, other_side) = match request.side {
            Side::Call => (request.open_calls, request.open_puts),
            Side::Put => (request.open_puts, request.open_calls),
        };
        // The lighter side may absorb the imbalance on top of the base cap
        let size_cap = if same_side < other_side {
            max_size
                .checked_add(other_side - same_side)
                .ok_or(RateError::Overflow)?
        } else {
            max_size
        };

        let payout = self.payout(request.amount, request.rounds)?;
        if payout > size_cap {
            return Err(RateError::PayoutExceedsMaximum {
                payout,
                maximum: size_cap,
            });
        }

        let total = request
            .amount
            .checked_add(payout)
            .ok_or(RateError::Overflow)?;
        let committed = request
            .open_calls
            .checked_add(request.open_puts)
            .and_then(|open| open.checked_add(total))
            .ok_or(RateError::Overflow)?;
        let max_utilization =
            apply_bps(balance, limits.max_utilization_bps).ok_or(RateError::Overflow)?;
        if committed > max_utilization {
            return Err(RateError::UtilizationExceeded {
                committed,
                maximum: max_utilization,
            });
        }

        Ok(total)
    }
}
