use tracing::warn;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
use crate::events::LedgerEvent;
use crate::payment::PaymentAsset;
use crate::registry::OwnershipRegistry;
use crate::state::{Address, LedgerState};

/// Issuance ledger for one collection of sequentially numbered units
///
/// Owns the counters, roles, fee rates and pause flag, and drives its injected
/// collaborators: the pricing curve, the ownership registry, the payment asset
/// and the clock. Every public operation takes `&mut self` and runs to
/// completion before the next one starts.
///
/// Operations live next to their argument types, one file per operation:
/// construction in `init_ledger`, quoting in `quote`, purchases in `buy`,
/// redemptions in `sell`, governance in `pause`, `update_creator` and
/// `update_admin`, and unit moves in `transfer_unit`.
#[derive(Debug)]
pub struct IssuanceLedger<C, R, P, K> {
    pub(crate) state: LedgerState,
    pub(crate) curve: C,
    pub(crate) registry: R,
    pub(crate) payment: P,
    pub(crate) clock: K,
    pub(crate) events: Vec<LedgerEvent>,
}

impl<C, R, P, K> IssuanceLedger<C, R, P, K>
where
    C: PricingCurve,
    R: OwnershipRegistry,
    P: PaymentAsset,
    K: Clock,
{
    /// Current ledger state
    #[must_use]
    pub const fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Pricing curve the ledger was built with
    #[must_use]
    pub const fn curve(&self) -> &C {
        &self.curve
    }

    /// Ownership registry collaborator
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Payment asset collaborator
    #[must_use]
    pub const fn payment(&self) -> &P {
        &self.payment
    }

    /// Mutable access to the payment asset, for funding and approvals made
    /// outside the ledger
    pub fn payment_mut(&mut self) -> &mut P {
        &mut self.payment
    }

    /// Clock used for holding-period checks
    #[must_use]
    pub const fn clock(&self) -> &K {
        &self.clock
    }

    /// Owner of unit `id` according to the registry
    #[must_use]
    pub fn owner_of(&self, id: u64) -> Option<Address> {
        self.registry.owner_of(id)
    }

    /// Timestamp at which unit `id` was minted, if it is live
    #[must_use]
    pub fn purchase_time(&self, id: u64) -> Option<i64> {
        self.state.purchase_times.get(&id).copied()
    }

    /// Units minted at construction (1, or 2 with a referrer)
    #[must_use]
    pub const fn pre_mint_offset(&self) -> u64 {
        self.state.pre_mint_offset()
    }

    /// Lowest total supply sales can reach
    #[must_use]
    pub const fn supply_floor(&self) -> u64 {
        self.state.pre_mint_offset()
    }

    /// Events recorded since the last call to [`Self::take_events`]
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drains recorded events
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn ensure_active(&self) -> Result<()> {
        if self.state.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    pub(crate) fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Runs collaborator calls under a checkpoint
    ///
    /// Either every registry and payment change made by `operation` is kept, or
    /// all of them are undone and the error is returned.
    pub(crate) fn atomically<T>(
        &mut self,
        operation: impl FnOnce(&mut R, &mut P) -> Result<T>,
    ) -> Result<T> {
        self.registry.begin();
        self.payment.begin();

        match operation(&mut self.registry, &mut self.payment) {
            Ok(value) => {
                self.registry.commit();
                self.payment.commit();
                Ok(value)
            }
            Err(error) => {
                warn!(%error, "operation failed, rolling back collaborators");
                self.registry.rollback();
                self.payment.rollback();
                Err(error)
            }
        }
    }
}
