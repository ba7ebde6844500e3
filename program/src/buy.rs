use tracing::info;

use crate::clock::Clock;
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, PaymentError, Result};
use crate::events::{LedgerEvent, UnitBought};
use crate::ledger::IssuanceLedger;
use crate::payment::PaymentAsset;
use crate::quote::ensure_batch_size;
use crate::registry::OwnershipRegistry;
use crate::state::{Address, Quote, Receipt};

/// Pulls `amount` from `from` unless it is zero
fn pull<P: PaymentAsset>(
    payment: &mut P,
    from: Address,
    to: Address,
    amount: u128,
) -> std::result::Result<(), PaymentError> {
    if amount == 0 {
        return Ok(());
    }
    payment.transfer_from(from, to, amount)
}

impl<C, R, P, K> IssuanceLedger<C, R, P, K>
where
    C: PricingCurve,
    R: OwnershipRegistry,
    P: PaymentAsset,
    K: Clock,
{
    /// Buys the next unit for the caller
    ///
    /// # Errors
    /// See [`Self::bulk_buy_to`].
    pub fn buy(&mut self, caller: Address, max_payment: u128) -> Result<Receipt> {
        self.purchase(caller, caller, 1, max_payment)
    }

    /// Buys the next unit, paid by the caller and minted to `to`
    ///
    /// # Errors
    /// See [`Self::bulk_buy_to`].
    pub fn buy_to(&mut self, caller: Address, to: Address, max_payment: u128) -> Result<Receipt> {
        self.purchase(caller, to, 1, max_payment)
    }

    /// Buys the next `count` units for the caller
    ///
    /// # Errors
    /// See [`Self::bulk_buy_to`].
    pub fn bulk_buy(&mut self, caller: Address, count: u64, max_payment: u128) -> Result<Receipt> {
        self.purchase(caller, caller, count, max_payment)
    }

    /// Buys the next `count` units, paid by the caller and minted to `to`
    ///
    /// Every unit is priced on its own curve position and its fees are taken
    /// individually; the streams are then summed and checked against
    /// `max_payment`, stopping at the first unit that crosses it. The caller pays with one transfer per stream: principal to
    /// custody, creator fee to the creator, admin fee to the admin.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The ledger is paused (`Paused`)
    /// - `count` is zero (`ZeroQuantity`)
    /// - `count` exceeds [`MAX_BATCH_UNITS`](crate::constants::MAX_BATCH_UNITS) (`BatchTooLarge`)
    /// - `to` is the zero address (`AddressZeroNotAllowed`)
    /// - Price plus fees exceeds `max_payment` (`MaxPaymentExceeded`); `actual`
    ///   is then the cost up to the first unit over the ceiling
    /// - A payment pull or mint fails; nothing is kept in that case
    pub fn bulk_buy_to(
        &mut self,
        caller: Address,
        to: Address,
        count: u64,
        max_payment: u128,
    ) -> Result<Receipt> {
        self.purchase(caller, to, count, max_payment)
    }

    fn purchase(
        &mut self,
        caller: Address,
        to: Address,
        count: u64,
        max_payment: u128,
    ) -> Result<Receipt> {
        self.ensure_active()?;
        if count == 0 {
            return Err(LedgerError::ZeroQuantity);
        }
        ensure_batch_size(count)?;
        if to.is_zero() {
            return Err(LedgerError::AddressZeroNotAllowed);
        }

        let mut units: Vec<(u64, Quote)> = Vec::new();
        let mut total = Quote::default();
        let mut owed = 0;
        for index in 0..count {
            let quote = self.quote_unit(self.state.buy_sequence(index)?)?;
            let token_id = self
                .state
                .last_id
                .checked_add(index)
                .and_then(|id| id.checked_add(1))
                .ok_or(LedgerError::ArithmeticError)?;
            total = total.checked_add(quote)?;
            owed = total.total_cost()?;
            if owed > max_payment {
                return Err(LedgerError::MaxPaymentExceeded {
                    actual: owed,
                    max_payment,
                });
            }
            units.push((token_id, quote));
        }

        let last_id = self
            .state
            .last_id
            .checked_add(count)
            .ok_or(LedgerError::ArithmeticError)?;
        let total_supply = self
            .state
            .total_supply
            .checked_add(count)
            .ok_or(LedgerError::ArithmeticError)?;

        let custody = self.state.custody;
        let creator = self.state.creator;
        let admin = self.state.admin;
        self.atomically(|registry, payment| {
            pull(payment, caller, custody, total.price)?;
            pull(payment, caller, creator, total.creator_fee)?;
            pull(payment, caller, admin, total.admin_fee)?;
            for (token_id, _) in &units {
                registry.mint(to, *token_id)?;
            }
            Ok(())
        })?;

        let now = self.clock.now();
        self.state.last_id = last_id;
        self.state.total_supply = total_supply;
        for (token_id, quote) in &units {
            self.state.purchase_times.insert(*token_id, now);
            self.emit(LedgerEvent::UnitBought(UnitBought {
                payer: caller,
                receiver: to,
                token_id: *token_id,
                price: quote.price,
                creator_fee: quote.creator_fee,
                admin_fee: quote.admin_fee,
            }));
        }

        info!(
            payer = %caller,
            receiver = %to,
            count,
            paid = owed,
            total_supply,
            "units bought"
        );

        Ok(Receipt {
            token_ids: units.into_iter().map(|(token_id, _)| token_id).collect(),
            quote: total,
            settled: owed,
        })
    }
}
