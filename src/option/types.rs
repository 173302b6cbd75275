//! Option book types

use crate::host::LedgerError;
use crate::oracle::OracleError;
use crate::pool::{PoolError, PoolStatus};
use crate::rate::RateError;
use crate::types::{Address, Amount, Bps, ErrorKind, Price, Round, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Option direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Pays out if the price at expiration is at or above the strike
    Call,
    /// Pays out if the price at expiration is at or below the strike
    Put,
}

/// How an evaluated position was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Beneficiary is paid
    Exercised,
    /// Reward returns to the pool
    Expired,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Exercised => "exercised",
            Outcome::Expired => "expired",
        }
    }
}

/// Position lifecycle; `Evaluated` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionState {
    Open,
    Evaluated(Outcome),
}

/// A single binary option written against the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryOption {
    /// Who is paid on exercise
    pub beneficiary: Address,
    /// Oracle price when opened
    pub strike_price: Price,
    /// Notional paid in by the beneficiary
    pub amount: Amount,
    /// Amount locked in the pool for this position
    pub reward: Amount,
    /// Oracle round when opened
    pub open_round: Round,
    /// Oracle round whose price settles the position
    pub expiration_round: Round,
    pub side: Side,
    pub state: PositionState,
}

impl BinaryOption {
    pub fn is_call(&self) -> bool {
        self.side == Side::Call
    }

    pub fn evaluated(&self) -> bool {
        matches!(self.state, PositionState::Evaluated(_))
    }
}

/// Optional fixed-cost gas accounting reported on each open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GasRefund {
    pub enabled: bool,
    /// Execution units charged per open
    pub gas_units: u64,
    /// Native price per unit
    pub gas_price: Amount,
}

impl GasRefund {
    /// Native-denominated cost of one open, if enabled
    pub fn cost(&self) -> Option<Amount> {
        if !self.enabled {
            return None;
        }
        (self.gas_units as u128).checked_mul(self.gas_price)
    }
}

/// Governance-tunable option parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionParams {
    pub min_rounds: Round,
    pub max_rounds: Round,
    /// Paid to third-party settlers (exercise) or any settler (expire)
    pub settler_fee_bps: Bps,
    /// Paid to the treasury on exercise
    pub protocol_fee_bps: Bps,
    pub gas_refund: GasRefund,
}

impl OptionParams {
    pub fn validate(&self) -> Result<(), OptionError> {
        validate_rounds(self.min_rounds, self.max_rounds)?;
        validate_fee("settler_fee_bps", self.settler_fee_bps)?;
        validate_fee("protocol_fee_bps", self.protocol_fee_bps)?;
        Ok(())
    }
}

impl Default for OptionParams {
    fn default() -> Self {
        Self {
            min_rounds: 1,
            max_rounds: 1_000,
            settler_fee_bps: 100,
            protocol_fee_bps: 100,
            gas_refund: GasRefund::default(),
        }
    }
}

pub(crate) fn validate_rounds(min: Round, max: Round) -> Result<(), OptionError> {
    if min == 0 || min > max {
        return Err(OptionError::InvalidRoundBounds { min, max });
    }
    Ok(())
}

pub(crate) fn validate_fee(name: &'static str, bps: Bps) -> Result<(), OptionError> {
    if bps as u128 > BPS_DENOMINATOR {
        return Err(OptionError::InvalidFee { name, bps });
    }
    Ok(())
}

/// How a settled position's reward was distributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: usize,
    pub outcome: Outcome,
    /// Oracle price at the expiration round
    pub price: Price,
    pub settler: Address,
    pub protocol_fee: Amount,
    pub settler_fee: Amount,
    pub beneficiary_payout: Amount,
    /// Left in the pool for shareholders
    pub retained: Amount,
}

/// Option book errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Access denied: governance capability required")]
    AccessDenied,
    #[error("Misconfigured: {0}")]
    Misconfigured(&'static str),
    #[error("Amount must be non-zero")]
    ZeroAmount,
    #[error("Unexpected attached value {0} for token option")]
    UnexpectedValue(Amount),
    /// Notional times the worst-case multiplier exceeds available capital
    #[error("Amount {amount} exceeds maximum {maximum} for available liquidity")]
    AmountTooLarge { amount: Amount, maximum: Amount },
    #[error("Pool is {0:?}, new options are disabled")]
    PoolNotActive(PoolStatus),
    #[error("Rounds {rounds} outside [{min}, {max}]")]
    InvalidRounds { rounds: Round, min: Round, max: Round },
    #[error("Invalid round bounds [{min}, {max}]")]
    InvalidRoundBounds { min: Round, max: Round },
    #[error("Invalid {name}: {bps} bps")]
    InvalidFee { name: &'static str, bps: Bps },
    #[error("Expiration round overflows")]
    RoundOverflow,
    #[error("Unknown position {0}")]
    UnknownPosition(usize),
    #[error("Position {0} already evaluated")]
    AlreadyEvaluated(usize),
    #[error("Position expires at round {expiration}, latest round is {latest}")]
    NotExpired { expiration: Round, latest: Round },
    #[error("Option arithmetic overflow")]
    Overflow,
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Rate(#[from] RateError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl OptionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionError::AccessDenied => ErrorKind::AccessDenied,
            OptionError::Misconfigured(_)
            | OptionError::InvalidRoundBounds { .. }
            | OptionError::InvalidFee { .. } => ErrorKind::Misconfiguration,
            OptionError::ZeroAmount
            | OptionError::UnexpectedValue(_)
            | OptionError::InvalidRounds { .. }
            | OptionError::Overflow => ErrorKind::InvalidAmount,
            OptionError::AmountTooLarge { .. } => ErrorKind::CapacityExceeded,
            OptionError::PoolNotActive(_)
            | OptionError::RoundOverflow
            | OptionError::UnknownPosition(_)
            | OptionError::AlreadyEvaluated(_)
            | OptionError::NotExpired { .. } => ErrorKind::StateViolation,
            OptionError::Pool(e) => e.kind(),
            OptionError::Rate(e) => e.kind(),
            OptionError::Oracle(e) => e.kind(),
            OptionError::Ledger(e) => e.kind(),
        }
    }
}
