use tracing::info;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
use crate::events::{AdminUpdated, LedgerEvent};
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
    /// Hands the admin role (and the admin fee stream) to `new_admin`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller is not the current admin (`Unauthorized`)
    /// - `new_admin` is the zero address (`AddressZeroNotAllowed`)
    pub fn update_admin(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        if caller != self.state.admin {
            return Err(LedgerError::Unauthorized { caller });
        }
        if new_admin.is_zero() {
            return Err(LedgerError::AddressZeroNotAllowed);
        }

        let old = self.state.admin;
        self.state.admin = new_admin;
        self.emit(LedgerEvent::AdminUpdated(AdminUpdated {
            old,
            new: new_admin,
        }));

        info!(%old, new = %new_admin, "admin updated");

        Ok(())
    }
}
