//! Tests for all-or-nothing operations
//!
//! Test coverage:
//! - A payment pull failing after earlier pulls succeeded
//! - A mint failing after every payment pull succeeded
//! - A payout failing after units were burned
//!
//! Every failure must leave balances, allowances, ownership, counters and
//! recorded events exactly as they were before the call.

mod common;

use bondkey_protocol::{
    InMemoryAsset, InMemoryRegistry, IssuanceLedger, LedgerError, ManualClock,
    OwnershipRegistry, PaymentAsset, PaymentError, RegistryError,
};
use common::{
    args, balance, fixture_curve, fund, ledger, ADMIN, ALICE, BOB, CREATOR, CUSTODY, START,
    WALLET,
};

/// Test rollback when the admin-fee pull exceeds the allowance
#[test]
fn test_admin_fee_pull_failure_rolls_back() {
    let mut ledger = ledger();
    let quote = ledger.price_to_buy_next().unwrap();
    let partial = quote.price + quote.creator_fee;
    ledger.payment_mut().mint(ALICE, WALLET).unwrap();
    ledger.payment_mut().approve(ALICE, partial);
    let state_before = ledger.state().clone();
    let events_before = ledger.events().len();

    let result = ledger.buy(ALICE, WALLET);

    assert_eq!(
        result,
        Err(LedgerError::Payment(PaymentError::InsufficientAllowance {
            owner: ALICE,
            required: quote.admin_fee,
            approved: 0,
        }))
    );
    assert_eq!(balance(&ledger, ALICE), WALLET);
    assert_eq!(balance(&ledger, CUSTODY), 0);
    assert_eq!(balance(&ledger, CREATOR), 0);
    assert_eq!(balance(&ledger, ADMIN), 0);
    assert_eq!(ledger.payment().allowance(ALICE), partial);
    assert_eq!(ledger.owner_of(2), None);
    assert_eq!(ledger.state(), &state_before);
    assert_eq!(ledger.events().len(), events_before);
}

/// Test rollback when the registry refuses to mint after payment
#[test]
fn test_mint_failure_rolls_back_payments() {
    let mut registry = InMemoryRegistry::new();
    registry.mint(BOB, 2).unwrap();
    let mut ledger = IssuanceLedger::new(
        args(),
        fixture_curve(),
        registry,
        InMemoryAsset::new(CUSTODY),
        ManualClock::new(START),
    )
    .unwrap();
    fund(&mut ledger, ALICE, WALLET);

    let result = ledger.buy(ALICE, WALLET);

    assert_eq!(
        result,
        Err(LedgerError::Registry(RegistryError::AlreadyMinted(2)))
    );
    assert_eq!(balance(&ledger, ALICE), WALLET);
    assert_eq!(balance(&ledger, CUSTODY), 0);
    assert_eq!(ledger.payment().allowance(ALICE), WALLET);
    assert_eq!(ledger.owner_of(2), Some(BOB));
    assert_eq!(ledger.state().total_supply, 1);
}

/// Test rollback when custody cannot cover a payout
#[test]
fn test_payout_failure_restores_burned_units() {
    let mut ledger = ledger();
    fund(&mut ledger, ALICE, WALLET);
    ledger.bulk_buy(ALICE, 2, WALLET).unwrap();
    let drained = balance(&ledger, CUSTODY);
    ledger.payment_mut().transfer(BOB, drained).unwrap();
    let state_before = ledger.state().clone();

    let result = ledger.bulk_sell(ALICE, &[2, 3]);

    assert!(matches!(
        result,
        Err(LedgerError::Payment(PaymentError::InsufficientBalance { .. }))
    ));
    assert_eq!(ledger.owner_of(2), Some(ALICE));
    assert_eq!(ledger.owner_of(3), Some(ALICE));
    assert!(!ledger.registry().is_burned(2));
    assert_eq!(ledger.state(), &state_before);
    assert_eq!(balance(&ledger, BOB), drained);
}
