//! Share ledger over a single base asset

use super::{PoolError, PoolParams, PoolSnapshot, PoolStatus, WithdrawReceipt};
use crate::host::{CallContext, Event, Host};
use crate::rewards;
use crate::telemetry;
use crate::types::{apply_bps, Address, Amount, Asset};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Depositor {
    shares: Amount,
    lock_until: Option<DateTime<Utc>>,
    entry_block: u64,
}

/// Proportional claims on the pool's balance, plus the locked amount
/// reserved against open options.
///
/// The balance itself is never stored; it is whatever the host ledger
/// reports for the pool's address.
#[derive(Debug)]
pub struct Pool {
    address: Address,
    asset: Asset,
    params: PoolParams,
    status: PoolStatus,
    locked: Amount,
    total_shares: Amount,
    depositors: HashMap<Address, Depositor>,
}

impl Pool {
    pub fn new(address: Address, asset: Asset, params: PoolParams) -> Self {
        Self {
            address,
            asset,
            params,
            status: PoolStatus::Active,
            locked: 0,
            total_shares: 0,
            depositors: HashMap::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    pub fn status(&self) -> PoolStatus {
        self.status
    }

    pub fn locked(&self) -> Amount {
        self.locked
    }

    pub fn total_shares(&self) -> Amount {
        self.total_shares
    }

    pub fn shares_of(&self, holder: &Address) -> Amount {
        self.depositors.get(holder).map(|d| d.shares).unwrap_or(0)
    }

    pub fn lock_until(&self, holder: &Address) -> Option<DateTime<Utc>> {
        self.depositors.get(holder).and_then(|d| d.lock_until)
    }

    /// Sum of every depositor's shares
    pub fn sum_of_shares(&self) -> Amount {
        self.depositors.values().map(|d| d.shares).sum()
    }

    pub fn balance(&self, host: &dyn Host) -> Amount {
        host.ledger().balance_of(&self.asset, &self.address)
    }

    /// Capital not reserved by open options
    pub fn available(&self, host: &dyn Host) -> Amount {
        self.balance(host).saturating_sub(self.locked)
    }

    /// What `holder`'s shares are currently worth
    pub fn value_of(&self, host: &dyn Host, holder: &Address) -> Amount {
        if self.total_shares == 0 {
            return 0;
        }
        self.shares_of(holder)
            .checked_mul(self.balance(host))
            .map(|v| v / self.total_shares)
            .unwrap_or(0)
    }

    /// Deposit into the pool and mint shares.
    ///
    /// Native pools take the attached value and ignore `amount`.
    pub fn deposit(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        amount: Amount,
    ) -> Result<Amount, PoolError> {
        if !self.status.allows_deposits() {
            return Err(PoolError::DepositsFrozen);
        }
        let amount = if self.asset.is_native() {
            ctx.value
        } else if ctx.value != 0 {
            return Err(PoolError::UnexpectedValue(ctx.value));
        } else {
            amount
        };
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }

        let balance_before = self.balance(host);
        let shares = if self.total_shares == 0 {
            amount
        } else if balance_before == 0 {
            return Err(PoolError::EmptyPool);
        } else {
            amount
                .checked_mul(self.total_shares)
                .ok_or(PoolError::Overflow)?
                / balance_before
        };
        if shares == 0 {
            return Err(PoolError::ZeroShares(amount));
        }
        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(PoolError::Overflow)?;
        let lock_until = ctx
            .now
            .checked_add_signed(self.params.lock_time)
            .ok_or(PoolError::Overflow)?;

        host.ledger_mut()
            .transfer(&self.asset, &ctx.caller, &self.address, amount)?;

        self.total_shares = total_shares;
        let depositor = self.depositors.entry(ctx.caller.clone()).or_default();
        if depositor.shares == 0 {
            depositor.entry_block = ctx.block;
        }
        depositor.shares += shares;
        depositor.lock_until = Some(lock_until);

        tracing::info!(
            pool = %self.address,
            user = %ctx.caller,
            amount = %amount,
            shares = %shares,
            "Deposit"
        );
        metrics::counter!(telemetry::DEPOSITS).increment(1);
        host.emit(Event::Deposit {
            pool: self.address.clone(),
            user: ctx.caller.clone(),
            amount,
            shares,
        });
        let result = host
            .rewards_mut()
            .track_participation(&self.address, &ctx.caller);
        rewards::report("track_participation", result);

        Ok(shares)
    }

    /// Burn `shares` and pay out their value, minus the early-withdrawal
    /// penalty while the caller's lock is still running.
    pub fn withdraw(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        shares: Amount,
    ) -> Result<WithdrawReceipt, PoolError> {
        if shares == 0 {
            return Err(PoolError::ZeroAmount);
        }
        let held = self.shares_of(&ctx.caller);
        if held < shares {
            return Err(PoolError::InsufficientShares {
                held,
                requested: shares,
            });
        }

        // Snapshot both sides of the ratio before anything moves
        let balance = self.balance(host);
        let total_shares = self.total_shares;
        let amount = shares.checked_mul(balance).ok_or(PoolError::Overflow)? / total_shares;
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        let available = balance.saturating_sub(self.locked);
        if amount > available {
            return Err(PoolError::InsufficientLiquidity {
                requested: amount,
                available,
            });
        }

        let locked_in = self
            .lock_until(&ctx.caller)
            .is_some_and(|until| ctx.now < until);
        let penalty = if locked_in {
            apply_bps(amount, self.params.withdraw_penalty_bps).ok_or(PoolError::Overflow)?
        } else {
            0
        };

        if penalty > 0 {
            host.ledger_mut().transfer(
                &self.asset,
                &self.address,
                &self.params.treasury,
                penalty,
            )?;
        }
        host.ledger_mut()
            .transfer(&self.asset, &self.address, &ctx.caller, amount - penalty)?;

        self.total_shares = total_shares - shares;
        let depositor = self.depositors.entry(ctx.caller.clone()).or_default();
        depositor.shares -= shares;
        depositor.lock_until = None;
        let blocks_elapsed = ctx.block.saturating_sub(depositor.entry_block);
        depositor.entry_block = ctx.block;
        if depositor.shares == 0 {
            self.depositors.remove(&ctx.caller);
        }

        tracing::info!(
            pool = %self.address,
            user = %ctx.caller,
            shares = %shares,
            amount = %amount,
            penalty = %penalty,
            "Withdraw"
        );
        metrics::counter!(telemetry::WITHDRAWALS).increment(1);
        host.emit(Event::Withdraw {
            pool: self.address.clone(),
            user: ctx.caller.clone(),
            shares,
            amount,
            penalty,
        });
        let result =
            host.rewards_mut()
                .track_option_rewards(&self.address, &ctx.caller, blocks_elapsed);
        rewards::report("track_option_rewards", result);

        Ok(WithdrawReceipt { amount, penalty })
    }

    /// Shares cannot change hands
    pub fn transfer_shares(
        &mut self,
        _ctx: &CallContext,
        _to: &Address,
        _shares: Amount,
    ) -> Result<(), PoolError> {
        Err(PoolError::SharesNonTransferable)
    }

    /// Reserve capital. Callers guarantee `locked` stays within the balance.
    pub(crate) fn lock(&mut self, host: &mut dyn Host, amount: Amount) -> Result<(), PoolError> {
        self.locked = self.locked.checked_add(amount).ok_or(PoolError::Overflow)?;
        tracing::debug!(pool = %self.address, amount = %amount, locked = %self.locked, "Lock");
        metrics::gauge!(telemetry::LOCKED, "pool" => self.address.to_string())
            .set(self.locked as f64);
        host.emit(Event::Lock {
            pool: self.address.clone(),
            amount,
        });
        Ok(())
    }

    pub(crate) fn unlock(&mut self, host: &mut dyn Host, amount: Amount) -> Result<(), PoolError> {
        if amount > self.locked {
            return Err(PoolError::UnlockExceedsLocked {
                amount,
                locked: self.locked,
            });
        }
        self.locked -= amount;
        tracing::debug!(pool = %self.address, amount = %amount, locked = %self.locked, "Unlock");
        metrics::gauge!(telemetry::LOCKED, "pool" => self.address.to_string())
            .set(self.locked as f64);
        host.emit(Event::Unlock {
            pool: self.address.clone(),
            amount,
        });
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: PoolStatus) -> PoolStatus {
        std::mem::replace(&mut self.status, status)
    }

    pub fn snapshot(&self, host: &dyn Host) -> PoolSnapshot {
        let balance = self.balance(host);
        let utilization = ratio(self.locked, balance);
        let share_price = if self.total_shares == 0 {
            Decimal::ONE
        } else {
            ratio(balance, self.total_shares)
        };
        PoolSnapshot {
            address: self.address.clone(),
            status: self.status,
            balance,
            locked: self.locked,
            available: balance.saturating_sub(self.locked),
            total_shares: self.total_shares,
            utilization,
            share_price,
        }
    }
}

fn ratio(numerator: Amount, denominator: Amount) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    match (
        Decimal::from_u128(numerator),
        Decimal::from_u128(denominator),
    ) {
        (Some(n), Some(d)) => n.checked_div(d).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}
