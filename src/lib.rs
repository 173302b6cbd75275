//! option-pool: Liquidity pool and binary option settlement engine
//!
//! This library provides the core components for:
//! - A share-based liquidity pool with lock/unlock accounting
//! - Pluggable rate calculators with size and utilization caps
//! - Binary call/put options settled against oracle rounds
//! - A factory that onboards assets under a governance capability
//! - Host abstractions (ledger, oracle, rewards, events) with an
//!   in-memory implementation for simulation
//! - Configuration, logging, metrics and a CLI

pub mod access;
pub mod cli;
pub mod config;
pub mod factory;
pub mod host;
pub mod option;
pub mod oracle;
pub mod pool;
pub mod rate;
pub mod rewards;
pub mod telemetry;
pub mod types;
