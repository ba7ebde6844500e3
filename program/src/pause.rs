use tracing::info;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
use crate::events::{LedgerEvent, PauseToggled};
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
    /// Sets the pause flag
    ///
    /// While paused, buys and sells fail with [`LedgerError::Paused`]; quotes,
    /// role updates and unit transfers stay available. Setting the flag to its
    /// current value is allowed and still recorded.
    ///
    /// # Errors
    /// [`LedgerError::Unauthorized`] unless the caller is the creator or the admin.
    pub fn pause(&mut self, caller: Address, paused: bool) -> Result<()> {
        if caller != self.state.creator && caller != self.state.admin {
            return Err(LedgerError::Unauthorized { caller });
        }

        let old = self.state.paused;
        self.state.paused = paused;

        self.emit(LedgerEvent::PauseToggled(PauseToggled {
            old,
            new: paused,
            caller,
        }));

        info!(%caller, old, new = paused, "pause flag updated");

        Ok(())
    }
}
