use tracing::debug;

use crate::clock::Clock;
use crate::constants::{FEE_BASIS_POINTS_DIVISOR, MAX_BATCH_UNITS};
use crate::curve::PricingCurve;
use crate::errors::{LedgerError, Result};
use crate::ledger::IssuanceLedger;
use crate::payment::PaymentAsset;
use crate::registry::OwnershipRegistry;
use crate::state::Quote;

/// Fee owed on `price` at `fee_bps`, rounded down
pub fn fee_for(price: u128, fee_bps: u16) -> Result<u128> {
    price
        .checked_mul(u128::from(fee_bps))
        .ok_or(LedgerError::ArithmeticError)?
        .checked_div(FEE_BASIS_POINTS_DIVISOR)
        .ok_or(LedgerError::ArithmeticError)
}

/// Rejects batches larger than [`MAX_BATCH_UNITS`]
pub const fn ensure_batch_size(count: u64) -> Result<()> {
    if count > MAX_BATCH_UNITS {
        return Err(LedgerError::BatchTooLarge {
            count,
            max: MAX_BATCH_UNITS,
        });
    }
    Ok(())
}

impl<C, R, P, K> IssuanceLedger<C, R, P, K>
where
    C: PricingCurve,
    R: OwnershipRegistry,
    P: PaymentAsset,
    K: Clock,
{
    /// Splits `price` into `(creator_fee, admin_fee)`
    ///
    /// Each stream is `price * bps / 10_000` truncated, computed independently.
    pub fn calculate_fees(&self, price: u128) -> Result<(u128, u128)> {
        Ok((
            fee_for(price, self.state.creator_fee_bps)?,
            fee_for(price, self.state.admin_fee_bps)?,
        ))
    }

    /// Price and fees of the unit at curve position `sequence`
    pub(crate) fn quote_unit(&self, sequence: u64) -> Result<Quote> {
        let price = self.curve.price_for_unit(sequence)?;
        let (creator_fee, admin_fee) = self.calculate_fees(price)?;
        Ok(Quote {
            price,
            creator_fee,
            admin_fee,
        })
    }

    /// Cost of the next unit
    pub fn price_to_buy_next(&self) -> Result<Quote> {
        self.price_to_buy_next_n(1)
    }

    /// Cost of the next `count` units
    ///
    /// Sums per-unit quotes. Fees are taken unit by unit, never on the summed
    /// price, so the result matches `count` single purchases to the last unit of
    /// the payment asset.
    ///
    /// # Errors
    /// [`LedgerError::BatchTooLarge`] above [`MAX_BATCH_UNITS`].
    pub fn price_to_buy_next_n(&self, count: u64) -> Result<Quote> {
        ensure_batch_size(count)?;
        let mut total = Quote::default();
        for index in 0..count {
            let quote = self.quote_unit(self.state.buy_sequence(index)?)?;
            total = total.checked_add(quote)?;
        }
        debug!(count, price = total.price, "buy quote");
        Ok(total)
    }

    /// Proceeds breakdown of the next sale
    pub fn price_to_sell_next(&self) -> Result<Quote> {
        self.price_to_sell_next_n(1)
    }

    /// Proceeds breakdown of the next `count` sales
    ///
    /// # Errors
    /// [`LedgerError::LastTokensCannotBeSold`] if `count` sales would cross the
    /// supply floor, [`LedgerError::BatchTooLarge`] above [`MAX_BATCH_UNITS`].
    pub fn price_to_sell_next_n(&self, count: u64) -> Result<Quote> {
        ensure_batch_size(count)?;
        let mut total = Quote::default();
        for index in 0..count {
            let quote = self.quote_unit(self.state.sell_sequence(index)?)?;
            total = total.checked_add(quote)?;
        }
        debug!(count, price = total.price, "sell quote");
        Ok(total)
    }
}
