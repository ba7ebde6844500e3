use std::collections::HashSet;
use tracing::info;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, PaymentError, Result};
use crate::events::{LedgerEvent, UnitSold};
use crate::ledger::IssuanceLedger;
use crate::payment::PaymentAsset;
use crate::registry::OwnershipRegistry;
use crate::state::{Address, Quote, Receipt};

/// Pushes `amount` out of custody unless it is zero
fn push<P: PaymentAsset>(
    payment: &mut P,
    to: Address,
    amount: u128,
) -> std::result::Result<(), PaymentError> {
    if amount == 0 {
        return Ok(());
    }
    payment.transfer(to, amount)
}

impl<C, R, P, K> IssuanceLedger<C, R, P, K>
where
    C: PricingCurve,
    R: OwnershipRegistry,
    P: PaymentAsset,
    K: Clock,
{
    /// Sells unit `token_id` back to the curve, accepting any price
    ///
    /// # Errors
    /// See [`Self::bulk_sell_with_min`].
    pub fn sell(&mut self, caller: Address, token_id: u64) -> Result<Receipt> {
        self.redeem(caller, &[token_id], 0)
    }

    /// Sells unit `token_id` if net proceeds reach `min_accepted`
    ///
    /// # Errors
    /// See [`Self::bulk_sell_with_min`].
    pub fn sell_with_min(
        &mut self,
        caller: Address,
        token_id: u64,
        min_accepted: u128,
    ) -> Result<Receipt> {
        self.redeem(caller, &[token_id], min_accepted)
    }

    /// Sells several units, accepting any price
    ///
    /// # Errors
    /// See [`Self::bulk_sell_with_min`].
    pub fn bulk_sell(&mut self, caller: Address, token_ids: &[u64]) -> Result<Receipt> {
        self.redeem(caller, token_ids, 0)
    }

    /// Sells several units if their combined net proceeds reach `min_accepted`
    ///
    /// Each sale is priced at the current top of the curve
    /// (`total_supply - pre_mint_offset`), whichever physical unit is burned, and
    /// supply drops by one between consecutive units of the batch. Net proceeds
    /// are price minus both fees; the creator and admin fees are paid out of
    /// custody alongside the seller, one transfer per stream.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The ledger is paused (`Paused`)
    /// - `token_ids` is empty (`ZeroQuantity`) or repeats an id (`DuplicateUnit`)
    /// - The caller does not own a unit (`CallerIsNotOwner`)
    /// - A unit is still inside its holding period (`MinHoldingTimeNotReached`)
    /// - The batch would take supply below the floor (`LastTokensCannotBeSold`)
    /// - Net proceeds are below `min_accepted` (`MinAcceptedPriceExceeded`)
    /// - A burn or payout fails; nothing is kept in that case
    pub fn bulk_sell_with_min(
        &mut self,
        caller: Address,
        token_ids: &[u64],
        min_accepted: u128,
    ) -> Result<Receipt> {
        self.redeem(caller, token_ids, min_accepted)
    }

    fn ensure_sellable(&self, caller: Address, token_id: u64, now: i64) -> Result<()> {
        let owner = self.registry.owner_of(token_id);
        if owner != Some(caller) {
            return Err(LedgerError::CallerIsNotOwner {
                token_id,
                owner: owner.unwrap_or_default(),
                caller,
            });
        }

        if self.state.min_holding_secs > 0 {
            if let Some(purchased_at) = self.purchase_time(token_id) {
                let holding = i64::try_from(self.state.min_holding_secs)
                    .map_err(|_| LedgerError::ArithmeticError)?;
                let sellable_at = purchased_at.saturating_add(holding);
                if now < sellable_at {
                    return Err(LedgerError::MinHoldingTimeNotReached {
                        token_id,
                        purchased_at,
                        sellable_at,
                    });
                }
            }
        }

        Ok(())
    }

    fn redeem(
        &mut self,
        caller: Address,
        token_ids: &[u64],
        min_accepted: u128,
    ) -> Result<Receipt> {
        self.ensure_active()?;
        if token_ids.is_empty() {
            return Err(LedgerError::ZeroQuantity);
        }

        let now = self.clock.now();
        let mut seen = HashSet::with_capacity(token_ids.len());
        let mut units: Vec<(u64, Quote)> = Vec::with_capacity(token_ids.len());
        let mut total = Quote::default();

        for (index, &token_id) in token_ids.iter().enumerate() {
            if !seen.insert(token_id) {
                return Err(LedgerError::DuplicateUnit { token_id });
            }
            self.ensure_sellable(caller, token_id, now)?;

            let index = u64::try_from(index).map_err(|_| LedgerError::ArithmeticError)?;
            let quote = self.quote_unit(self.state.sell_sequence(index)?)?;
            total = total.checked_add(quote)?;
            units.push((token_id, quote));
        }

        let net = total.net_proceeds()?;
        if net < min_accepted {
            return Err(LedgerError::MinAcceptedPriceExceeded {
                actual: net,
                min_accepted,
            });
        }

        let count = u64::try_from(units.len()).map_err(|_| LedgerError::ArithmeticError)?;
        let total_supply = self
            .state
            .total_supply
            .checked_sub(count)
            .ok_or(LedgerError::ArithmeticError)?;

        let creator = self.state.creator;
        let admin = self.state.admin;
        self.atomically(|registry, payment| {
            for (token_id, _) in &units {
                registry.burn(*token_id)?;
            }
            push(payment, caller, net)?;
            push(payment, creator, total.creator_fee)?;
            push(payment, admin, total.admin_fee)?;
            Ok(())
        })?;

        self.state.total_supply = total_supply;
        for (token_id, quote) in &units {
            self.state.purchase_times.remove(token_id);
            self.emit(LedgerEvent::UnitSold(UnitSold {
                seller: caller,
                token_id: *token_id,
                price: quote.price,
                creator_fee: quote.creator_fee,
                admin_fee: quote.admin_fee,
            }));
        }

        info!(
            seller = %caller,
            count,
            received = net,
            total_supply,
            "units sold"
        );

        Ok(Receipt {
            token_ids: units.into_iter().map(|(token_id, _)| token_id).collect(),
            quote: total,
            settled: net,
        })
    }
}
