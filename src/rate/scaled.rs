//! Duration-scaled strategy
//!
//! Longer options pay more: the multiplier starts at `base_bps` and grows
//! by `per_round_bps` for every round, saturating at `cap_bps`.

use super::{RateCalculator, RateError, RateLimits};
use crate::types::{apply_bps, Amount, Bps, Round, BPS_DENOMINATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScaledCalculator {
    limits: RateLimits,
    base_bps: Bps,
    per_round_bps: Bps,
    cap_bps: Bps,
}

impl RoundScaledCalculator {
    pub fn new(
        limits: RateLimits,
        base_bps: Bps,
        per_round_bps: Bps,
        cap_bps: Bps,
    ) -> Result<Self, RateError> {
        limits.validate()?;
        if cap_bps == 0 {
            return Err(RateError::InvalidParameter {
                name: "cap_bps",
                value: cap_bps,
            });
        }
        if base_bps > cap_bps {
            return Err(RateError::InvalidParameter {
                name: "base_bps",
                value: base_bps,
            });
        }
        Ok(Self {
            limits,
            base_bps,
            per_round_bps,
            cap_bps,
        })
    }

    /// Effective multiplier for an option of `rounds` duration
    pub fn multiplier_for(&self, rounds: Round) -> Bps {
        self.per_round_bps
            .saturating_mul(rounds)
            .saturating_add(self.base_bps)
            .min(self.cap_bps)
    }
}

impl RateCalculator for RoundScaledCalculator {
    fn name(&self) -> &'static str {
        "round_scaled"
    }

    fn limits(&self) -> RateLimits {
        self.limits
    }

    fn payout(&self, amount: Amount, rounds: Round) -> Result<Amount, RateError> {
        apply_bps(amount, self.multiplier_for(rounds)).ok_or(RateError::Overflow)
    }

    fn max_multiplier_bps(&self) -> Bps {
        BPS_DENOMINATOR as Bps + self.cap_bps
    }
}
