//! Share accounting across multiple providers

use crate::common::{ctx, eth, pool_params, start, Fixture};
use chrono::Duration;
use option_pool::factory::OptionRegistry;
use option_pool::host::{CallContext, Chain};
use option_pool::option::OptionError;
use option_pool::pool::{Pool, PoolError};
use option_pool::types::{Address, ErrorKind};

#[test]
fn test_withdraw_after_lock_has_no_penalty() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 30_000).unwrap();
    book.deposit(chain, &ctx("lp2"), 10_000).unwrap();

    let later = CallContext::new("lp2", start() + Duration::days(15));
    let receipt = book.withdraw(chain, &later, 10_000).unwrap();
    assert_eq!(receipt.amount, 10_000);
    assert_eq!(receipt.penalty, 0);
    assert_eq!(book.pool().total_shares(), 30_000);
    assert_eq!(fx.balance("lp2"), 1_000_000);
    assert_eq!(fx.balance("treasury"), 0);
}

#[test]
fn test_early_withdraw_pays_penalty_to_treasury() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 30_000).unwrap();
    book.deposit(chain, &ctx("lp2"), 10_000).unwrap();

    let soon = CallContext::new("lp2", start() + Duration::days(1));
    let receipt = book.withdraw(chain, &soon, 10_000).unwrap();
    assert_eq!(receipt.amount, 10_000);
    assert_eq!(receipt.penalty, 100);
    assert_eq!(receipt.net(), 9_900);
    assert_eq!(book.pool().balance(chain), 30_000);
    assert_eq!(fx.balance("lp2"), 1_000_000 - 100);
    assert_eq!(fx.balance("treasury"), 100);
}

#[test]
fn test_redeposit_restarts_lock() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 1_000).unwrap();
    let later = start() + Duration::days(10);
    book.deposit(chain, &CallContext::new("lp1", later), 1_000)
        .unwrap();
    assert_eq!(
        book.pool().lock_until(&Address::new("lp1")),
        Some(later + Duration::days(14))
    );
}

#[test]
fn test_locked_capital_cannot_be_withdrawn() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 10_000).unwrap();
    chain.oracle.publish(&eth(), 1, 100).unwrap();
    book.open_call(chain, &ctx("alice"), 1_000, 2).unwrap();
    assert_eq!(book.pool().locked(), 2_000);

    let err = book.withdraw(chain, &ctx("lp1"), 10_000).unwrap_err();
    assert_eq!(
        err,
        OptionError::Pool(PoolError::InsufficientLiquidity {
            requested: 11_000,
            available: 9_000,
        })
    );
    assert_eq!(err.kind(), ErrorKind::InvalidAmount);
    assert_eq!(book.pool().total_shares(), 10_000);
}

#[test]
fn test_withdraw_more_than_held_rejected() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();
    book.deposit(chain, &ctx("lp1"), 500).unwrap();

    let err = book.withdraw(chain, &ctx("lp1"), 501).unwrap_err();
    assert_eq!(
        err,
        OptionError::Pool(PoolError::InsufficientShares {
            held: 500,
            requested: 501,
        })
    );
}

#[test]
fn test_shares_are_not_transferable() {
    let mut pool = Pool::new(Address::new("pool"), eth(), pool_params());
    let mut chain = Chain::new(OptionRegistry::new(), 0);
    chain.ledger.mint(&eth(), &Address::new("lp1"), 100).unwrap();
    pool.deposit(&mut chain, &ctx("lp1"), 100).unwrap();

    let err = pool
        .transfer_shares(&ctx("lp1"), &Address::new("lp2"), 50)
        .unwrap_err();
    assert_eq!(err, PoolError::SharesNonTransferable);
    assert_eq!(pool.shares_of(&Address::new("lp1")), 100);
    assert_eq!(pool.shares_of(&Address::new("lp2")), 0);
}
