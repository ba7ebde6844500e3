use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::clock::Clock;
use crate::constants::{CREATOR_PRE_MINT, MAX_FEE_BPS, REFERRER_PRE_MINT};
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
use crate::events::{LedgerEvent, LedgerInitialized};
use crate::ledger::IssuanceLedger;
use crate::payment::PaymentAsset;
use crate::registry::OwnershipRegistry;
use crate::state::{Address, LedgerState};

/// Construction parameters of an issuance ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitLedgerArgs {
    /// Collection name
    #[serde(default)]
    pub name: String,
    /// Collection symbol
    #[serde(default)]
    pub symbol: String,
    /// Metadata URI
    #[serde(default)]
    pub uri: String,
    /// Issuer address (must be non-zero)
    pub creator: Address,
    /// Creator fee in basis points (max 2500)
    pub creator_fee_bps: u16,
    /// Creator royalty on secondary sales in basis points (max 2500)
    #[serde(default)]
    pub creator_royalty_bps: u16,
    /// Platform operator address (must be non-zero)
    pub admin: Address,
    /// Admin fee in basis points (max 2500)
    pub admin_fee_bps: u16,
    /// Optional referrer, pre-minted the second unit
    #[serde(default)]
    pub referrer: Option<Address>,
    /// Minimum seconds a unit must be held before it can be sold (0 disables)
    #[serde(default)]
    pub min_holding_secs: u64,
}

impl InitLedgerArgs {
    /// Checks addresses and fee caps without building anything
    ///
    /// # Errors
    /// - [`LedgerError::AddressZeroNotAllowed`] for a null creator, admin or referrer
    /// - [`LedgerError::MaxFeeExceeded`] for any rate above [`MAX_FEE_BPS`]
    pub fn validate(&self) -> Result<()> {
        if self.creator.is_zero()
            || self.admin.is_zero()
            || self.referrer.is_some_and(|referrer| referrer.is_zero())
        {
            return Err(LedgerError::AddressZeroNotAllowed);
        }

        for value in [
            self.creator_fee_bps,
            self.admin_fee_bps,
            self.creator_royalty_bps,
        ] {
            if value > MAX_FEE_BPS {
                return Err(LedgerError::MaxFeeExceeded {
                    value,
                    max: MAX_FEE_BPS,
                });
            }
        }

        Ok(())
    }
}

impl<C, R, P, K> IssuanceLedger<C, R, P, K>
where
    C: PricingCurve,
    R: OwnershipRegistry,
    P: PaymentAsset,
    K: Clock,
{
    /// Builds a ledger and pre-mints the creator's unit (and the referrer's)
    ///
    /// Unit 1 goes to the creator, unit 2 to the referrer when one is configured.
    /// Pre-minted units are never charged for and anchor the supply floor. The
    /// creator is published to the registry as royalty receiver.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The creator, admin or referrer is the zero address
    /// - A fee or royalty rate exceeds 2500 bps
    /// - The registry rejects a pre-mint
    pub fn new(args: InitLedgerArgs, curve: C, registry: R, payment: P, clock: K) -> Result<Self> {
        args.validate()?;

        let now = clock.now();
        let custody = payment.custody();
        let pre_minted = if args.referrer.is_some() {
            CREATOR_PRE_MINT
                .checked_add(REFERRER_PRE_MINT)
                .ok_or(LedgerError::ArithmeticError)?
        } else {
            CREATOR_PRE_MINT
        };

        let mut ledger = Self {
            state: LedgerState {
                name: args.name,
                symbol: args.symbol,
                uri: args.uri,
                custody,
                creator: args.creator,
                admin: args.admin,
                referrer: args.referrer,
                creator_fee_bps: args.creator_fee_bps,
                admin_fee_bps: args.admin_fee_bps,
                creator_royalty_bps: args.creator_royalty_bps,
                min_holding_secs: args.min_holding_secs,
                paused: false,
                last_id: 0,
                total_supply: 0,
                purchase_times: HashMap::new(),
            },
            curve,
            registry,
            payment,
            clock,
            events: Vec::new(),
        };

        let creator = args.creator;
        let referrer = args.referrer;
        let royalty_bps = args.creator_royalty_bps;
        ledger.atomically(|registry, _| {
            registry.mint(creator, 1)?;
            if let Some(referrer) = referrer {
                registry.mint(referrer, 2)?;
            }
            registry.set_royalty_receiver(creator, royalty_bps)?;
            Ok(())
        })?;

        ledger.state.last_id = pre_minted;
        ledger.state.total_supply = pre_minted;
        for id in 1..=pre_minted {
            ledger.state.purchase_times.insert(id, now);
        }

        ledger.emit(LedgerEvent::LedgerInitialized(LedgerInitialized {
            creator,
            admin: args.admin,
            referrer,
            creator_fee_bps: args.creator_fee_bps,
            admin_fee_bps: args.admin_fee_bps,
            creator_royalty_bps: royalty_bps,
            pre_minted,
            timestamp: now,
        }));

        info!(
            %creator,
            admin = %args.admin,
            pre_minted,
            creator_fee_bps = args.creator_fee_bps,
            admin_fee_bps = args.admin_fee_bps,
            "issuance ledger initialized"
        );

        Ok(ledger)
    }
}
