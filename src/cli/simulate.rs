//! Simulate command implementation
//!
//! Replays a scenario file against an in-memory chain and reports the
//! resulting pool state and event journal.

use crate::access::GovernanceCap;
use crate::config::Config;
use crate::factory::OptionFactory;
use crate::host::{CallContext, Chain, Event};
use crate::option::{OptionBook, Side};
use crate::pool::{PoolSnapshot, PoolStatus};
use crate::telemetry;
use crate::types::{Address, Amount, Asset, Round};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Scenario file (TOML)
    #[arg(long)]
    pub scenario: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

impl SimulateArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let handle = if self.metrics {
            Some(telemetry::install_prometheus()?)
        } else {
            None
        };

        let scenario = Scenario::load(&self.scenario)
            .with_context(|| format!("loading scenario {}", self.scenario.display()))?;
        tracing::info!(steps = scenario.steps.len(), "Running scenario");

        let mut simulation = Simulation::new(config, scenario.start)?;
        for step in &scenario.steps {
            simulation.apply(step);
        }
        let report = simulation.report()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_table(&report);
        }
        if let Some(handle) = handle {
            println!("{}", handle.render());
        }
        Ok(())
    }
}

/// A scripted sequence of calls
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Host time of the first step (RFC 3339)
    #[serde(default = "default_start")]
    pub start: DateTime<Utc>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_start() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Scenario {
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Credit an account on the ledger
    Mint { account: String, amount: u64 },
    Deposit { account: String, amount: u64 },
    Withdraw { account: String, shares: u64 },
    /// Publish the next oracle round
    Price { price: u64 },
    Open {
        account: String,
        side: Side,
        amount: u64,
        rounds: Round,
    },
    Complete { account: String, id: usize },
    /// Move host time and block height forward
    Advance {
        #[serde(default)]
        secs: i64,
        #[serde(default)]
        blocks: u64,
    },
    /// Governance status change
    Status { status: PoolStatus },
}

impl Step {
    fn action(&self) -> &'static str {
        match self {
            Step::Mint { .. } => "mint",
            Step::Deposit { .. } => "deposit",
            Step::Withdraw { .. } => "withdraw",
            Step::Price { .. } => "price",
            Step::Open { .. } => "open",
            Step::Complete { .. } => "complete",
            Step::Advance { .. } => "advance",
            Step::Status { .. } => "status",
        }
    }
}

/// Result of one scenario step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub ok: bool,
    pub detail: String,
}

/// End-of-run summary
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub pool: PoolSnapshot,
    pub open_calls: Amount,
    pub open_puts: Amount,
    pub positions: usize,
    pub steps: Vec<StepReport>,
    pub events: Vec<Event>,
}

/// One factory, one option book and the chain they run on
pub struct Simulation {
    chain: Chain,
    factory: OptionFactory,
    cap: GovernanceCap,
    asset: Asset,
    now: DateTime<Utc>,
    block: u64,
    steps: Vec<StepReport>,
}

impl Simulation {
    pub fn new(config: &Config, start: DateTime<Utc>) -> anyhow::Result<Self> {
        let (mut factory, cap) = OptionFactory::new(config.pool_params()?, config.option_params());
        let mut chain = Chain::new(factory.registry(), config.oracle.round_tolerance);
        let asset = config.pool.asset.clone();
        chain.oracle.add_source(asset.clone());
        factory.create_option(&mut chain, &cap, asset.clone(), config.calculator()?)?;

        Ok(Self {
            chain,
            factory,
            cap,
            asset,
            now: start,
            block: 0,
            steps: vec![],
        })
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn book(&self) -> Option<&OptionBook> {
        self.factory.option(&self.asset)
    }

    /// Apply one step; failures are recorded and the run continues
    pub fn apply(&mut self, step: &Step) -> bool {
        let index = self.steps.len();
        let (ok, detail) = match self.try_apply(step) {
            Ok(detail) => (true, detail),
            Err(e) => {
                tracing::warn!(step = index, action = step.action(), error = %e, "Step rejected");
                (false, e.to_string())
            }
        };
        self.steps.push(StepReport {
            step: index,
            action: step.action(),
            ok,
            detail,
        });
        ok
    }

    fn ctx(&self, account: &str, amount: Amount) -> CallContext {
        let ctx = CallContext::new(account, self.now).at_block(self.block);
        if self.asset.is_native() {
            ctx.with_value(amount)
        } else {
            ctx
        }
    }

    fn try_apply(&mut self, step: &Step) -> anyhow::Result<String> {
        match step {
            Step::Mint { account, amount } => {
                self.chain
                    .ledger
                    .mint(&self.asset, &Address::new(account.as_str()), *amount as Amount)?;
                Ok(format!("{account} +{amount}"))
            }
            Step::Deposit { account, amount } => {
                let ctx = self.ctx(account, *amount as Amount);
                let book = book_mut(&mut self.factory, &self.asset)?;
                let shares = book.deposit(&mut self.chain, &ctx, *amount as Amount)?;
                Ok(format!("{account} minted {shares} shares"))
            }
            Step::Withdraw { account, shares } => {
                let ctx = self.ctx(account, 0);
                let book = book_mut(&mut self.factory, &self.asset)?;
                let receipt = book.withdraw(&mut self.chain, &ctx, *shares as Amount)?;
                Ok(format!(
                    "{account} received {} (penalty {})",
                    receipt.net(),
                    receipt.penalty
                ))
            }
            Step::Price { price } => {
                let round = self.chain.oracle.push(&self.asset, *price as u128)?;
                Ok(format!("round {round} at {price}"))
            }
            Step::Open {
                account,
                side,
                amount,
                rounds,
            } => {
                let ctx = self.ctx(account, *amount as Amount);
                let book = book_mut(&mut self.factory, &self.asset)?;
                let id = book.open(&mut self.chain, &ctx, *side, *amount as Amount, *rounds)?;
                let reward = book.position(id).map(|p| p.reward).unwrap_or_default();
                Ok(format!("position {id} locks {reward}"))
            }
            Step::Complete { account, id } => {
                let ctx = self.ctx(account, 0);
                let book = book_mut(&mut self.factory, &self.asset)?;
                let settlement = book.complete(&mut self.chain, &ctx, *id)?;
                Ok(format!(
                    "position {id} {} at {}, paid {}",
                    settlement.outcome.as_str(),
                    settlement.price,
                    settlement.beneficiary_payout
                ))
            }
            Step::Advance { secs, blocks } => {
                self.now = Duration::try_seconds(*secs)
                    .and_then(|step| self.now.checked_add_signed(step))
                    .context("time step out of range")?;
                self.block = self.block.saturating_add(*blocks);
                Ok(format!("now {} block {}", self.now, self.block))
            }
            Step::Status { status } => {
                let book = book_mut(&mut self.factory, &self.asset)?;
                book.set_status(&mut self.chain, &self.cap, *status)?;
                Ok(format!("status {status:?}"))
            }
        }
    }

    pub fn report(&self) -> anyhow::Result<Report> {
        let book = self.book().context("option book missing")?;
        Ok(Report {
            pool: book.pool().snapshot(&self.chain),
            open_calls: book.open_calls(),
            open_puts: book.open_puts(),
            positions: book.positions().len(),
            steps: self.steps.clone(),
            events: self.chain.events.clone(),
        })
    }
}

fn book_mut<'a>(factory: &'a mut OptionFactory, asset: &Asset) -> anyhow::Result<&'a mut OptionBook> {
    factory.option_mut(asset).context("option book missing")
}

fn print_table(report: &Report) {
    println!("Steps:");
    for step in &report.steps {
        let mark = if step.ok { "ok" } else { "REJECTED" };
        println!("  [{:>3}] {:<9} {:<8} {}", step.step, step.action, mark, step.detail);
    }
    println!();
    println!("Events:");
    for event in &report.events {
        match serde_json::to_string(event) {
            Ok(line) => println!("  {line}"),
            Err(_) => println!("  {event:?}"),
        }
    }
    println!();
    let pool = &report.pool;
    println!("Pool {} ({:?})", pool.address, pool.status);
    println!("  Balance:      {}", pool.balance);
    println!("  Locked:       {}", pool.locked);
    println!("  Available:    {}", pool.available);
    println!("  Total shares: {}", pool.total_shares);
    println!("  Utilization:  {}", pool.utilization);
    println!("  Share price:  {}", pool.share_price);
    println!("  Open calls:   {}", report.open_calls);
    println!("  Open puts:    {}", report.open_puts);
    println!("  Positions:    {}", report.positions);
}
