//! Binary options
//!
//! Positions are written against the pool's capital: opening one locks
//! the reward computed by the active rate calculator, settling it releases
//! the lock and pays the beneficiary or leaves the value to shareholders.
//! Positions live in an append-only arena addressed by index.

mod book;
mod settlement;
mod types;

pub use book::OptionBook;
pub use settlement::{decide, waterfall, Payouts};
pub use types::{
    BinaryOption, GasRefund, OptionError, OptionParams, Outcome, PositionState, Settlement, Side,
};
