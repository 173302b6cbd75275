//! Deposit, open, settle, withdraw

use crate::common::{ctx, eth, Fixture};
use option_pool::host::Event;
use option_pool::option::{Outcome, Side};
use option_pool::types::Address;

#[test]
fn test_exercised_call_pays_beneficiary() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 100_000).unwrap();
    chain.oracle.publish(&eth(), 1, 2_000).unwrap();

    let id = book.open(chain, &ctx("alice"), Side::Call, 1_000, 3).unwrap();
    assert_eq!(book.position(id).unwrap().reward, 2_000);

    for (round, price) in [(2, 1_900), (3, 1_950), (4, 2_000)] {
        chain.oracle.publish(&eth(), round, price).unwrap();
    }
    let settlement = book.complete(chain, &ctx("keeper"), id).unwrap();

    // Price closed exactly at the strike: calls win ties
    assert_eq!(settlement.outcome, Outcome::Exercised);
    assert_eq!(settlement.protocol_fee, 100);
    assert_eq!(settlement.settler_fee, 190);
    assert_eq!(settlement.beneficiary_payout, 1_710);
    assert_eq!(book.pool().locked(), 0);
    assert_eq!(book.pool().balance(chain), 99_000);

    assert_eq!(fx.balance("alice"), 1_000_000 - 1_000 + 1_710);
    assert_eq!(fx.balance("keeper"), 190);
    assert_eq!(fx.balance("treasury"), 100);
}

#[test]
fn test_expired_put_enriches_pool() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 100_000).unwrap();
    chain.oracle.publish(&eth(), 1, 2_000).unwrap();
    let id = book.open_put(chain, &ctx("alice"), 1_000, 2).unwrap();
    chain.oracle.publish(&eth(), 2, 2_100).unwrap();
    chain.oracle.publish(&eth(), 3, 2_200).unwrap();

    let settlement = book.complete(chain, &ctx("bob"), id).unwrap();
    assert_eq!(settlement.outcome, Outcome::Expired);
    assert_eq!(settlement.beneficiary_payout, 0);
    assert_eq!(settlement.protocol_fee, 0);
    // Settler fee comes out of the full reward
    assert_eq!(settlement.settler_fee, 200);
    assert_eq!(settlement.retained, 1_800);
    assert_eq!(book.pool().balance(chain), 100_800);
    assert_eq!(book.open_puts(), 0);

    // The only LP now owns the premium
    let lp_value = book.pool().value_of(chain, &Address::new("lp1"));
    assert_eq!(lp_value, 100_800);
}

#[test]
fn test_beneficiary_settling_own_exercise_pays_no_settler_fee() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 100_000).unwrap();
    chain.oracle.publish(&eth(), 1, 2_000).unwrap();
    let id = book.open_put(chain, &ctx("alice"), 1_000, 2).unwrap();
    chain.oracle.publish(&eth(), 2, 1_800).unwrap();
    chain.oracle.publish(&eth(), 3, 1_700).unwrap();

    let settlement = book.complete(chain, &ctx("alice"), id).unwrap();
    assert_eq!(settlement.outcome, Outcome::Exercised);
    assert_eq!(settlement.settler_fee, 0);
    assert_eq!(settlement.beneficiary_payout, 1_900);
}

#[test]
fn test_event_journal_order() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    chain.take_events();
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1"), 10_000).unwrap();
    chain.oracle.publish(&eth(), 1, 500).unwrap();
    book.open_call(chain, &ctx("alice"), 100, 2).unwrap();
    chain.oracle.publish(&eth(), 3, 400).unwrap();
    book.complete(chain, &ctx("bob"), 0).unwrap();

    let kinds: Vec<&str> = chain
        .events
        .iter()
        .map(|event| match event {
            Event::Deposit { .. } => "deposit",
            Event::Lock { .. } => "lock",
            Event::PositionOpened { .. } => "opened",
            Event::Unlock { .. } => "unlock",
            Event::Expired { .. } => "expired",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["deposit", "lock", "opened", "unlock", "expired"]);
}

#[test]
fn test_gas_refund_and_participation_tracked() {
    let mut fx = Fixture::new();
    let Fixture { factory, chain, .. } = &mut fx;
    let book = factory.option_mut(&eth()).unwrap();

    book.deposit(chain, &ctx("lp1").at_block(10), 10_000).unwrap();
    chain.oracle.publish(&eth(), 1, 500).unwrap();
    book.open_call(chain, &ctx("alice"), 100, 2).unwrap();
    book.withdraw(chain, &ctx("lp1").at_block(60), 1_000).unwrap();

    let lp = chain.rewards.user(&Address::new("lp1"));
    assert_eq!(lp.participations, 1);
    assert_eq!(lp.liquidity_blocks, 50);
    assert_eq!(chain.rewards.user(&Address::new("alice")).gas, 50_000);
}
