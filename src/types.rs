//! Shared primitive types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity of the pool's base asset (smallest unit)
pub type Amount = u128;

/// Oracle price, fixed-point as reported by the oracle
pub type Price = u128;

/// Oracle round number, the option's unit of time
pub type Round = u64;

/// Basis points (1/10000)
pub type Bps = u64;

/// Denominator for all basis-point arithmetic
pub const BPS_DENOMINATOR: u128 = 10_000;

/// `amount * bps / 10000`, floor-rounded. `None` on overflow.
pub fn apply_bps(amount: Amount, bps: Bps) -> Option<Amount> {
    amount
        .checked_mul(bps as u128)
        .map(|scaled| scaled / BPS_DENOMINATOR)
}

/// An account on the host ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Deterministic address for a contract instance, e.g. `option:token:ETH`
    pub fn derived(kind: &str, seed: &str) -> Self {
        Self(format!("{kind}:{seed}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The base asset a pool is denominated in
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    /// The host chain's native currency; amounts arrive as attached value
    Native,
    /// A token identified by its symbol
    Token(String),
}

impl Asset {
    pub fn token(symbol: impl Into<String>) -> Self {
        Self::Token(symbol.into())
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    pub fn symbol(&self) -> &str {
        match self {
            Asset::Native => "native",
            Asset::Token(symbol) => symbol,
        }
    }

    /// Identity string, distinct for every asset
    pub fn key(&self) -> String {
        match self {
            Asset::Native => "native".to_string(),
            Asset::Token(symbol) => format!("token:{symbol}"),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Failure taxonomy shared by every error type in the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required collaborator or parameter was never set
    Misconfiguration,
    /// Caller lacks the governance capability or position ownership
    AccessDenied,
    /// Zero amounts or amounts exceeding available bounds
    InvalidAmount,
    /// Operation not allowed in the current pool or position state
    StateViolation,
    /// Rate calculator size or utilization caps exceeded
    CapacityExceeded,
}
