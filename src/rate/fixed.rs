//! Fixed multiplier strategy

use super::{RateCalculator, RateError, RateLimits};
use crate::types::{apply_bps, Amount, Bps, Round, BPS_DENOMINATOR};

/// Pays a constant multiple of the notional regardless of duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRateCalculator {
    limits: RateLimits,
    multiplier_bps: Bps,
}

impl FixedRateCalculator {
    pub fn new(limits: RateLimits, multiplier_bps: Bps) -> Result<Self, RateError> {
        limits.validate()?;
        if multiplier_bps == 0 {
            return Err(RateError::InvalidParameter {
                name: "multiplier_bps",
                value: multiplier_bps,
            });
        }
        Ok(Self {
            limits,
            multiplier_bps,
        })
    }

    pub fn multiplier_bps(&self) -> Bps {
        self.multiplier_bps
    }
}

impl RateCalculator for FixedRateCalculator {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn limits(&self) -> RateLimits {
        self.limits
    }

    fn payout(&self, amount: Amount, _rounds: Round) -> Result<Amount, RateError> {
        apply_bps(amount, self.multiplier_bps).ok_or(RateError::Overflow)
    }

    fn max_multiplier_bps(&self) -> Bps {
        BPS_DENOMINATOR as Bps + self.multiplier_bps
    }
}
