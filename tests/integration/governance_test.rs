//! Capability-gated administration

use crate::common::{ctx, eth, option_params, pool_params, Fixture};
use option_pool::factory::{FactoryError, OptionFactory};
use option_pool::host::Event;
use option_pool::option::{OptionError, Side};
use option_pool::pool::{PoolError, PoolStatus};
use option_pool::rate::{FixedRateCalculator, RateLimits, RoundScaledCalculator};
use option_pool::types::{Asset, ErrorKind};

fn fixed() -> Box<FixedRateCalculator> {
    Box::new(FixedRateCalculator::new(RateLimits::default(), 5_000).unwrap())
}

#[test]
fn test_foreign_cap_is_rejected() {
    let mut fx = Fixture::new();
    let (mut other, other_cap) = OptionFactory::new(pool_params(), option_params());

    let err = fx
        .factory
        .option_mut(&eth())
        .unwrap()
        .set_settler_fee(&mut fx.chain, &other_cap, 0)
        .unwrap_err();
    assert_eq!(err, OptionError::AccessDenied);
    assert_eq!(err.kind(), ErrorKind::AccessDenied);

    let err = fx
        .factory
        .create_option(&mut fx.chain, &other_cap, Asset::token("BTC"), fixed())
        .unwrap_err();
    assert_eq!(err, FactoryError::AccessDenied);

    // The other factory still accepts its own capability
    other
        .create_option(&mut fx.chain, &other_cap, Asset::token("BTC"), fixed())
        .unwrap();
    assert!(other.option(&Asset::token("BTC")).is_some());
    assert!(fx.factory.option(&Asset::token("BTC")).is_none());
}

#[test]
fn test_one_option_per_asset() {
    let mut fx = Fixture::new();
    let Fixture {
        factory, cap, chain, ..
    } = &mut fx;
    let err = factory.create_option(chain, cap, eth(), fixed()).unwrap_err();
    assert_eq!(err, FactoryError::AlreadyExists(eth()));
    assert_eq!(err.kind(), ErrorKind::StateViolation);
    assert_eq!(factory.options().count(), 1);
}

#[test]
fn test_inactive_pool_blocks_options_not_deposits() {
    let mut fx = Fixture::new();
    let Fixture {
        factory, cap, chain, ..
    } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();
    book.deposit(chain, &ctx("lp1"), 10_000).unwrap();
    chain.oracle.publish(&eth(), 1, 100).unwrap();
    book.open_call(chain, &ctx("alice"), 100, 2).unwrap();

    book.deactivate(chain, cap).unwrap();
    assert_eq!(
        book.open_put(chain, &ctx("alice"), 100, 2).unwrap_err(),
        OptionError::PoolNotActive(PoolStatus::Inactive)
    );
    book.deposit(chain, &ctx("lp2"), 1_000).unwrap();

    // Open positions still settle
    chain.oracle.publish(&eth(), 3, 150).unwrap();
    book.complete(chain, &ctx("bob"), 0).unwrap();
    assert!(chain.events.iter().any(|e| matches!(
        e,
        Event::StatusChanged {
            old: PoolStatus::Active,
            new: PoolStatus::Inactive,
            ..
        }
    )));
}

#[test]
fn test_frozen_pool_blocks_deposits_not_withdrawals() {
    let mut fx = Fixture::new();
    let Fixture {
        factory, cap, chain, ..
    } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();
    book.deposit(chain, &ctx("lp1"), 10_000).unwrap();

    book.freeze(chain, cap).unwrap();
    let err = book.deposit(chain, &ctx("lp2"), 1_000).unwrap_err();
    assert_eq!(err, OptionError::Pool(PoolError::DepositsFrozen));
    book.withdraw(chain, &ctx("lp1"), 5_000).unwrap();

    book.set_status(chain, cap, PoolStatus::Active).unwrap();
    book.deposit(chain, &ctx("lp2"), 1_000).unwrap();
}

#[test]
fn test_calculator_swap_changes_quotes() {
    let mut fx = Fixture::new();
    let Fixture {
        factory, cap, chain, ..
    } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();
    book.deposit(chain, &ctx("lp1"), 100_000).unwrap();

    assert_eq!(book.quote(chain, Side::Call, 1_000, 10).unwrap(), 2_000);

    let scaled = RoundScaledCalculator::new(RateLimits::default(), 5_000, 100, 9_000).unwrap();
    book.set_calculator(chain, cap, Box::new(scaled)).unwrap();
    assert_eq!(book.calculator().name(), "round_scaled");
    // 0.5x + 10 rounds * 1% = 0.6x
    assert_eq!(book.quote(chain, Side::Call, 1_000, 10).unwrap(), 1_600);
    assert!(matches!(
        chain.events.last(),
        Some(Event::CalculatorChanged { old, new, .. }) if old == "fixed" && new == "round_scaled"
    ));
}

#[test]
fn test_parameter_setters_validate() {
    let mut fx = Fixture::new();
    let Fixture {
        factory, cap, chain, ..
    } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    assert_eq!(
        book.set_rounds(chain, cap, 10, 5).unwrap_err(),
        OptionError::InvalidRoundBounds { min: 10, max: 5 }
    );
    assert!(matches!(
        book.set_protocol_fee(chain, cap, 10_001).unwrap_err(),
        OptionError::InvalidFee { .. }
    ));

    book.set_rounds(chain, cap, 5, 10).unwrap();
    book.set_gas_refund(chain, cap, false).unwrap();
    assert_eq!(book.params().min_rounds, 5);
    assert!(!book.params().gas_refund.enabled);

    chain.oracle.publish(&eth(), 1, 100).unwrap();
    book.deposit(chain, &ctx("lp1"), 10_000).unwrap();
    assert_eq!(
        book.open_call(chain, &ctx("alice"), 10, 4).unwrap_err(),
        OptionError::InvalidRounds {
            rounds: 4,
            min: 5,
            max: 10
        }
    );
}
