//! Asset balances held by the host

use crate::types::{Address, Amount, Asset, ErrorKind};
use std::collections::HashMap;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Sender cannot cover the transfer
    #[error("Insufficient {asset} balance for {holder}: have {available}, need {required}")]
    InsufficientFunds {
        asset: Asset,
        holder: Address,
        available: Amount,
        required: Amount,
    },
    /// Receiving balance would overflow
    #[error("Balance overflow")]
    Overflow,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidAmount
    }
}

/// Balance queries and transfers of any asset between accounts
pub trait AssetLedger: Send + Sync {
    /// Current balance of `holder` in `asset`
    fn balance_of(&self, asset: &Asset, holder: &Address) -> Amount;
    /// Move `amount` of `asset` from `from` to `to`
    fn transfer(
        &mut self,
        asset: &Asset,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// In-memory ledger
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    balances: HashMap<(Asset, Address), Amount>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` out of thin air
    pub fn mint(&mut self, asset: &Asset, holder: &Address, amount: Amount) -> Result<(), LedgerError> {
        let balance = self
            .balances
            .entry((asset.clone(), holder.clone()))
            .or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

impl AssetLedger for MemoryLedger {
    fn balance_of(&self, asset: &Asset, holder: &Address) -> Amount {
        self.balances
            .get(&(asset.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: &Asset,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                asset: asset.clone(),
                holder: from.clone(),
                available,
                required: amount,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        let received = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances
            .insert((asset.clone(), from.clone()), available - amount);
        self.balances.insert((asset.clone(), to.clone()), received);
        Ok(())
    }
}
