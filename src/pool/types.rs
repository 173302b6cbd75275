//! Pool types

use crate::host::LedgerError;
use crate::types::{Address, Amount, Bps, ErrorKind};
use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pool errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Zero-value deposit or withdrawal
    #[error("Amount must be non-zero")]
    ZeroAmount,
    /// Native value attached to a token pool call
    #[error("Unexpected attached value {0} for token pool")]
    UnexpectedValue(Amount),
    /// Deposit too small to mint a single share
    #[error("Deposit of {0} mints zero shares")]
    ZeroShares(Amount),
    /// Caller holds fewer shares than requested
    #[error("Insufficient shares: held {held}, requested {requested}")]
    InsufficientShares { held: Amount, requested: Amount },
    /// Withdrawal larger than unlocked capital
    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: Amount, available: Amount },
    /// Unlock larger than the locked amount
    #[error("Cannot unlock {amount}, only {locked} locked")]
    UnlockExceedsLocked { amount: Amount, locked: Amount },
    /// Pool is frozen
    #[error("Deposits are frozen")]
    DepositsFrozen,
    /// Shares outstanding but nothing backing them
    #[error("Pool has outstanding shares but zero balance")]
    EmptyPool,
    /// Shares are claim tracking only
    #[error("Pool shares are non-transferable")]
    SharesNonTransferable,
    /// Arithmetic overflow
    #[error("Pool arithmetic overflow")]
    Overflow,
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoolError::DepositsFrozen
            | PoolError::EmptyPool
            | PoolError::SharesNonTransferable => ErrorKind::StateViolation,
            PoolError::Ledger(e) => e.kind(),
            _ => ErrorKind::InvalidAmount,
        }
    }
}

/// Governance-controlled pool status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    /// Deposits and new options allowed
    #[default]
    Active,
    /// No new options; deposits, withdrawals and settlement continue
    Inactive,
    /// No new options or deposits; withdrawals and settlement continue
    Frozen,
}

impl PoolStatus {
    pub fn allows_deposits(&self) -> bool {
        !matches!(self, PoolStatus::Frozen)
    }

    pub fn allows_new_options(&self) -> bool {
        matches!(self, PoolStatus::Active)
    }
}

/// Pool parameters fixed at creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    /// Early-withdrawal window after each deposit
    pub lock_time: Duration,
    /// Penalty charged on withdrawals inside the window
    pub withdraw_penalty_bps: Bps,
    /// Receiver of penalties and protocol fees
    pub treasury: Address,
}

/// Result of a withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    /// Gross value of the burned shares
    pub amount: Amount,
    /// Part of `amount` routed to the treasury
    pub penalty: Amount,
}

impl WithdrawReceipt {
    /// What the caller actually received
    pub fn net(&self) -> Amount {
        self.amount - self.penalty
    }
}

/// Point-in-time view of a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub address: Address,
    pub status: PoolStatus,
    pub balance: Amount,
    pub locked: Amount,
    pub available: Amount,
    pub total_shares: Amount,
    /// locked / balance
    pub utilization: Decimal,
    /// balance / total_shares
    pub share_price: Decimal,
}
