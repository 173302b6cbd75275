//! Integration tests

mod common;
mod config_test;
mod governance_test;
mod invariants_test;
mod lifecycle_test;
mod liquidity_test;
