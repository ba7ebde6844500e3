use tracing::debug;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
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
    /// Moves unit `token_id` from the caller to `to`
    ///
    /// Not gated by the pause flag. The unit keeps its original purchase time,
    /// so a transfer neither restarts nor skips the holding period.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller does not own the unit (`CallerIsNotOwner`)
    /// - `to` is the zero address (`AddressZeroNotAllowed`)
    pub fn transfer_unit(&mut self, caller: Address, to: Address, token_id: u64) -> Result<()> {
        let owner = self.registry.owner_of(token_id);
        if owner != Some(caller) {
            return Err(LedgerError::CallerIsNotOwner {
                token_id,
                owner: owner.unwrap_or_default(),
                caller,
            });
        }
        if to.is_zero() {
            return Err(LedgerError::AddressZeroNotAllowed);
        }

        self.atomically(|registry, _| {
            registry.transfer(caller, to, token_id)?;
            Ok(())
        })?;

        debug!(from = %caller, %to, token_id, "unit transferred");

        Ok(())
    }
}
