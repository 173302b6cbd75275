//! Shared fixtures

use chrono::{DateTime, Duration, TimeZone, Utc};
use option_pool::access::GovernanceCap;
use option_pool::factory::OptionFactory;
use option_pool::host::{CallContext, Chain};
use option_pool::option::{GasRefund, OptionParams};
use option_pool::pool::PoolParams;
use option_pool::rate::{FixedRateCalculator, RateLimits};
use option_pool::types::{Address, Asset};

pub fn eth() -> Asset {
    Asset::token("ETH")
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn ctx(user: &str) -> CallContext {
    CallContext::new(user, start())
}

pub fn pool_params() -> PoolParams {
    PoolParams {
        lock_time: Duration::days(14),
        withdraw_penalty_bps: 100,
        treasury: Address::new("treasury"),
    }
}

pub fn option_params() -> OptionParams {
    OptionParams {
        min_rounds: 2,
        max_rounds: 100,
        settler_fee_bps: 1_000,
        protocol_fee_bps: 500,
        gas_refund: GasRefund {
            enabled: true,
            gas_units: 50_000,
            gas_price: 1,
        },
    }
}

pub struct Fixture {
    pub factory: OptionFactory,
    pub cap: GovernanceCap,
    pub chain: Chain,
}

impl Fixture {
    /// ETH option with a 1x fixed calculator and funded accounts
    pub fn new() -> Self {
        let (mut factory, cap) = OptionFactory::new(pool_params(), option_params());
        let mut chain = Chain::new(factory.registry(), 0);
        let calculator =
            FixedRateCalculator::new(RateLimits::new(1_000, 8_000).unwrap(), 10_000).unwrap();
        factory
            .create_option(&mut chain, &cap, eth(), Box::new(calculator))
            .unwrap();
        for user in ["lp1", "lp2", "alice", "bob"] {
            chain.ledger.mint(&eth(), &Address::new(user), 1_000_000).unwrap();
        }
        Self {
            factory,
            cap,
            chain,
        }
    }

    pub fn balance(&self, user: &str) -> u128 {
        use option_pool::host::AssetLedger;
        self.chain.ledger.balance_of(&eth(), &Address::new(user))
    }
}
