//! Quote command implementation

use crate::config::Config;
use crate::option::Side;
use crate::rate::RateRequest;
use crate::types::Amount;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    Call,
    Put,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Call => Side::Call,
            SideArg::Put => Side::Put,
        }
    }
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Pool balance
    #[arg(long)]
    pub balance: u128,

    /// Reward locked by open calls
    #[arg(long, default_value = "0")]
    pub calls: u128,

    /// Reward locked by open puts
    #[arg(long, default_value = "0")]
    pub puts: u128,

    /// Option notional
    #[arg(long)]
    pub amount: u128,

    /// Duration in oracle rounds
    #[arg(long)]
    pub rounds: u64,

    #[arg(long, value_enum, default_value = "call")]
    pub side: SideArg,
}

impl QuoteArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let calculator = config.calculator()?;
        let locked: Amount = self.calls.saturating_add(self.puts);
        let available = self.balance.saturating_sub(locked);

        let request = RateRequest {
            pool_balance: self.balance,
            open_calls: self.calls,
            open_puts: self.puts,
            amount: self.amount,
            rounds: self.rounds,
            side: self.side.into(),
            pending_deposit: 0,
        };

        println!("Calculator: {}", calculator.name());
        println!("  Max amount: {}", calculator.max_amount(available));
        match calculator.calculate_rate(&request) {
            Ok(reward) => {
                println!("  Reward:     {}", reward);
                println!("  Payout:     {}", reward.saturating_sub(self.amount));
            }
            Err(e) => println!("  Rejected:   {} ({:?})", e, e.kind()),
        }
        Ok(())
    }
}
