//! Off-ledger quoting
//!
//! Prices units straight from a curve and a fee schedule, without building a
//! ledger. Results match what a ledger with the same curve and rates charges,
//! because both use the same per-unit fee rule.

use bondkey_protocol::{ensure_batch_size, fee_for, InitLedgerArgs, PricingCurve, Quote};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SdkError};
use crate::validation::{validate_fee_bps, validate_table_range};

/// Creator and admin fee rates in basis points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub creator_fee_bps: u16,
    pub admin_fee_bps: u16,
}

impl FeeSchedule {
    /// Validated fee schedule
    pub fn new(creator_fee_bps: u16, admin_fee_bps: u16) -> Result<Self> {
        validate_fee_bps(creator_fee_bps)?;
        validate_fee_bps(admin_fee_bps)?;
        Ok(Self {
            creator_fee_bps,
            admin_fee_bps,
        })
    }

    /// Rates configured for a ledger
    #[must_use]
    pub const fn from_args(args: &InitLedgerArgs) -> Self {
        Self {
            creator_fee_bps: args.creator_fee_bps,
            admin_fee_bps: args.admin_fee_bps,
        }
    }

    /// Price and fee breakdown of a single unit priced at `price`
    pub fn quote(&self, price: u128) -> Result<Quote> {
        Ok(Quote {
            price,
            creator_fee: fee_for(price, self.creator_fee_bps)?,
            admin_fee: fee_for(price, self.admin_fee_bps)?,
        })
    }
}

/// One row of a price table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Curve position
    pub unit: u64,
    pub price: u128,
    pub creator_fee: u128,
    pub admin_fee: u128,
    /// Price plus both fees
    pub total: u128,
}

/// Prices every `step`-th curve position in `from..=to`
///
/// # Errors
/// Returns an error if the range is empty, `step` is zero, or a price
/// overflows.
pub fn price_table<C: PricingCurve>(
    curve: &C,
    fees: FeeSchedule,
    from: u64,
    to: u64,
    step: u64,
) -> Result<Vec<PriceRow>> {
    validate_table_range(from, to, step)?;
    let step = usize::try_from(step)
        .map_err(|_| SdkError::InvalidConfig(format!("table step {step} is too large")))?;

    let mut rows = Vec::new();
    for unit in (from..=to).step_by(step) {
        let quote = fees.quote(curve.price_for_unit(unit)?)?;
        rows.push(PriceRow {
            unit,
            price: quote.price,
            creator_fee: quote.creator_fee,
            admin_fee: quote.admin_fee,
            total: quote.total_cost()?,
        });
    }

    debug!(from, to, rows = rows.len(), "price table computed");
    Ok(rows)
}

/// Cost of buying `count` units after `sold` units have been bought from the
/// curve
///
/// `sold` excludes pre-minted units: on a ledger it is
/// `total_supply - pre_mint_offset`.
pub fn cost_to_buy<C: PricingCurve>(
    curve: &C,
    fees: FeeSchedule,
    sold: u64,
    count: u64,
) -> Result<Quote> {
    ensure_batch_size(count)?;
    let mut total = Quote::default();
    for index in 0..count {
        let unit = sold
            .checked_add(index)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| SdkError::InvalidConfig("unit position overflows".to_string()))?;
        total = total.checked_add(fees.quote(curve.price_for_unit(unit)?)?)?;
    }
    Ok(total)
}

/// Proceeds of selling `count` units back when `sold` units are outstanding
///
/// # Errors
/// Returns an error if `count` exceeds `sold`, since pre-minted units can never
/// be sold against the curve.
pub fn proceeds_of_selling<C: PricingCurve>(
    curve: &C,
    fees: FeeSchedule,
    sold: u64,
    count: u64,
) -> Result<Quote> {
    if count > sold {
        return Err(SdkError::InvalidConfig(format!(
            "cannot sell {count} units when only {sold} were bought from the curve"
        )));
    }
    ensure_batch_size(count)?;

    let mut total = Quote::default();
    for index in 0..count {
        let unit = sold
            .checked_sub(index)
            .ok_or_else(|| SdkError::InvalidConfig("unit position underflows".to_string()))?;
        total = total.checked_add(fees.quote(curve.price_for_unit(unit)?)?)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondkey_protocol::{LedgerError, LinearCurve, ManualClock};

    use crate::config::tests::sample_config;

    const FEES: FeeSchedule = FeeSchedule {
        creator_fee_bps: 700,
        admin_fee_bps: 300,
    };

    #[test]
    fn test_fee_schedule_rejects_excess() {
        assert!(FeeSchedule::new(700, 300).is_ok());
        assert!(FeeSchedule::new(2_600, 300).is_err());
    }

    #[test]
    fn test_reference_fee_split() {
        let quote = FEES.quote(1_000_000).unwrap();
        assert_eq!(quote.creator_fee, 70_000);
        assert_eq!(quote.admin_fee, 30_000);
        assert_eq!(quote.total_cost().unwrap(), 1_100_000);
    }

    #[test]
    fn test_price_table_rows() {
        let curve = LinearCurve {
            base_price: 1_000,
            slope: 10,
        };

        let rows = price_table(&curve, FeeSchedule::default(), 0, 10, 5).unwrap();

        let units: Vec<u64> = rows.iter().map(|row| row.unit).collect();
        assert_eq!(units, vec![0, 5, 10]);
        assert_eq!(rows[2].price, 1_100);
        assert_eq!(rows[2].total, 1_100);
    }

    #[test]
    fn test_price_table_rejects_zero_step() {
        let curve = LinearCurve {
            base_price: 1,
            slope: 1,
        };
        assert!(price_table(&curve, FEES, 0, 10, 0).is_err());
    }

    #[test]
    fn test_cost_to_buy_matches_ledger() {
        let config = sample_config();
        let curve = config.curve.build().unwrap();
        let ledger = config.build_in_memory(ManualClock::new(0)).unwrap();

        let offline = cost_to_buy(&curve, FeeSchedule::from_args(&config.ledger), 0, 7).unwrap();

        assert_eq!(offline, ledger.price_to_buy_next_n(7).unwrap());
    }

    #[test]
    fn test_proceeds_of_selling_bounds() {
        let curve = LinearCurve {
            base_price: 100,
            slope: 100,
        };

        let quote = proceeds_of_selling(&curve, FeeSchedule::default(), 3, 2).unwrap();
        assert_eq!(quote.price, 400 + 300);
        assert!(proceeds_of_selling(&curve, FEES, 1, 2).is_err());
    }

    #[test]
    fn test_batch_quotes_are_capped() {
        let curve = LinearCurve {
            base_price: 100,
            slope: 100,
        };

        assert!(matches!(
            cost_to_buy(&curve, FEES, 0, u64::MAX),
            Err(SdkError::Ledger(LedgerError::BatchTooLarge { .. }))
        ));
        assert!(matches!(
            proceeds_of_selling(&curve, FEES, u64::MAX, u64::MAX),
            Err(SdkError::Ledger(LedgerError::BatchTooLarge { .. }))
        ));
    }
}
