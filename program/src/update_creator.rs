use tracing::info;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
use crate::events::{CreatorUpdated, LedgerEvent};
use crate::ledger::IssuanceLedger;
use crate::payment::PaymentAsset;
use crate::registry::OwnershipRegistry;
use crate::state::Address;

impl<C, R, P, K> IssuanceLedger<C, R, P, K>
where
    C: PricingCurve,
    R: OwnershipRegistry,
    P: PaymentAsset,
    K: Clock,
{
    /// Hands the creator role to `new_creator`
    ///
    /// The registry's royalty receiver follows the role, at the unchanged
    /// royalty rate. Units already held by the old creator stay with them.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller is not the current creator (`Unauthorized`)
    /// - `new_creator` is the zero address (`AddressZeroNotAllowed`)
    /// - The registry rejects the royalty update
    pub fn update_creator(&mut self, caller: Address, new_creator: Address) -> Result<()> {
        if caller != self.state.creator {
            return Err(LedgerError::Unauthorized { caller });
        }
        if new_creator.is_zero() {
            return Err(LedgerError::AddressZeroNotAllowed);
        }

        let royalty_bps = self.state.creator_royalty_bps;
        self.atomically(|registry, _| {
            registry.set_royalty_receiver(new_creator, royalty_bps)?;
            Ok(())
        })?;

        let old = self.state.creator;
        self.state.creator = new_creator;
        self.emit(LedgerEvent::CreatorUpdated(CreatorUpdated {
            old,
            new: new_creator,
        }));

        info!(%old, new = %new_creator, "creator updated");

        Ok(())
    }
}
