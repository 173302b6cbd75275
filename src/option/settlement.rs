//! Exercise/expire decision and fee waterfall

use super::{OptionError, Outcome, Side};
use crate::types::{apply_bps, Amount, Bps, Price};

/// Decide a position against the price at its expiration round.
///
/// A price exactly at the strike exercises on both sides.
pub fn decide(side: Side, strike_price: Price, price: Price) -> Outcome {
    let expires = match side {
        Side::Call => strike_price > price,
        Side::Put => price > strike_price,
    };
    if expires {
        Outcome::Expired
    } else {
        Outcome::Exercised
    }
}

/// Split of a settled reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payouts {
    pub protocol_fee: Amount,
    pub settler_fee: Amount,
    pub beneficiary: Amount,
    /// Stays in the pool
    pub retained: Amount,
}

/// Distribute `reward` for `outcome`.
///
/// Exercise: protocol fee first, then the settler fee on the remainder
/// (only when the settler is not the beneficiary), the rest to the
/// beneficiary. Expire: the settler fee on the whole reward, the rest
/// stays in the pool.
pub fn waterfall(
    reward: Amount,
    outcome: Outcome,
    protocol_fee_bps: Bps,
    settler_fee_bps: Bps,
    settler_is_beneficiary: bool,
) -> Result<Payouts, OptionError> {
    match outcome {
        Outcome::Exercised => {
            let protocol_fee = apply_bps(reward, protocol_fee_bps).ok_or(OptionError::Overflow)?;
            let remainder = reward - protocol_fee;
            let settler_fee = if settler_is_beneficiary {
                0
            } else {
                apply_bps(remainder, settler_fee_bps).ok_or(OptionError::Overflow)?
            };
            Ok(Payouts {
                protocol_fee,
                settler_fee,
                beneficiary: remainder - settler_fee,
                retained: 0,
            })
        }
        Outcome::Expired => {
            let settler_fee = apply_bps(reward, settler_fee_bps).ok_or(OptionError::Overflow)?;
            Ok(Payouts {
                protocol_fee: 0,
                settler_fee,
                beneficiary: 0,
                retained: reward - settler_fee,
            })
        }
    }
}
