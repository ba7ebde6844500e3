//! Shared fixtures for the ledger integration tests

#![allow(dead_code)]

use bondkey_protocol::{
    Address, CurveParams, InMemoryAsset, InMemoryLedger, InMemoryRegistry, InitLedgerArgs,
    IssuanceLedger, ManualClock, SigmoidCurve,
};

pub const CREATOR: Address = Address::repeat_byte(0x11);
pub const ADMIN: Address = Address::repeat_byte(0x22);
pub const REFERRER: Address = Address::repeat_byte(0x33);
pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const BOB: Address = Address::repeat_byte(0xb0);
pub const CUSTODY: Address = Address::repeat_byte(0xcc);

/// 2024-01-01T00:00:00Z
pub const START: i64 = 1_704_067_200;

pub const CREATOR_FEE_BPS: u16 = 700;
pub const ADMIN_FEE_BPS: u16 = 300;

/// Plenty of payment asset for any test scenario
pub const WALLET: u128 = 1_000_000_000_000_000;

pub type TestLedger = InMemoryLedger<SigmoidCurve>;

pub const fn fixture_params() -> CurveParams {
    CurveParams {
        base_price: 1_000_000,
        linear_slope: 100_000,
        inflection_price: 845_000_000,
        inflection_point: 2_000,
    }
}

pub fn fixture_curve() -> SigmoidCurve {
    SigmoidCurve::new(fixture_params()).unwrap()
}

pub fn args() -> InitLedgerArgs {
    InitLedgerArgs {
        name: "Bond Keys".to_string(),
        symbol: "BKEY".to_string(),
        uri: "ipfs://bond-keys".to_string(),
        creator: CREATOR,
        creator_fee_bps: CREATOR_FEE_BPS,
        creator_royalty_bps: 500,
        admin: ADMIN,
        admin_fee_bps: ADMIN_FEE_BPS,
        referrer: None,
        min_holding_secs: 0,
    }
}

pub fn ledger_with(args: InitLedgerArgs) -> TestLedger {
    IssuanceLedger::new(
        args,
        fixture_curve(),
        InMemoryRegistry::new(),
        InMemoryAsset::new(CUSTODY),
        ManualClock::new(START),
    )
    .unwrap()
}

pub fn ledger() -> TestLedger {
    ledger_with(args())
}

pub fn ledger_with_referrer() -> TestLedger {
    ledger_with(InitLedgerArgs {
        referrer: Some(REFERRER),
        ..args()
    })
}

/// Credits `account` and approves custody to pull all of it
pub fn fund<C>(ledger: &mut InMemoryLedger<C>, account: Address, amount: u128)
where
    C: bondkey_protocol::PricingCurve,
{
    ledger.payment_mut().mint(account, amount).unwrap();
    let allowance = ledger.payment().allowance(account);
    ledger
        .payment_mut()
        .approve(account, allowance.saturating_add(amount));
}

pub fn balance<C>(ledger: &InMemoryLedger<C>, account: Address) -> u128
where
    C: bondkey_protocol::PricingCurve,
{
    ledger.payment().balance_of(account)
}
