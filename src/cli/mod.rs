//! CLI interface for option-pool
//!
//! Provides subcommands for:
//! - `simulate`: Replay a scenario against an in-memory chain
//! - `quote`: Price a prospective option with the configured calculator
//! - `config`: Show configuration

mod quote;
mod simulate;

pub use quote::{QuoteArgs, SideArg};
pub use simulate::{Report, Scenario, SimulateArgs, Simulation, Step, StepReport};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "option-pool")]
#[command(about = "Liquidity pool and binary option settlement engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scenario file
    Simulate(SimulateArgs),
    /// Quote the reward for a prospective option
    Quote(QuoteArgs),
    /// Show configuration
    Config,
}
