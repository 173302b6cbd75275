//! Events emitted by pools, options and the factory

use crate::option::{Outcome, Side};
use crate::pool::PoolStatus;
use crate::types::{Address, Amount, Asset, Price, Round};
use serde::{Deserialize, Serialize};

/// An observable state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    OptionCreated {
        asset: Asset,
        option: Address,
    },
    Deposit {
        pool: Address,
        user: Address,
        amount: Amount,
        shares: Amount,
    },
    Withdraw {
        pool: Address,
        user: Address,
        shares: Amount,
        amount: Amount,
        penalty: Amount,
    },
    Lock {
        pool: Address,
        amount: Amount,
    },
    Unlock {
        pool: Address,
        amount: Amount,
    },
    PositionOpened {
        pool: Address,
        id: usize,
        side: Side,
        price: Price,
        amount: Amount,
        reward: Amount,
        expiration: Round,
    },
    Exercised {
        pool: Address,
        id: usize,
    },
    Expired {
        pool: Address,
        id: usize,
    },
    ParameterChanged {
        pool: Address,
        name: String,
        old: String,
        new: String,
    },
    StatusChanged {
        pool: Address,
        old: PoolStatus,
        new: PoolStatus,
    },
    CalculatorChanged {
        pool: Address,
        old: String,
        new: String,
    },
}

impl Event {
    /// Settlement outcome carried by `Exercised` / `Expired`
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Event::Exercised { .. } => Some(Outcome::Exercised),
            Event::Expired { .. } => Some(Outcome::Expired),
            _ => None,
        }
    }
}
