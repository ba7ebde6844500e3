//! Program constants
//!
//! Mathematical and protocol constants used throughout the issuance engine.
//! These values are immutable and represent universal constants or protocol-level
//! invariants that should never change post-deployment.

/// Basis points divisor for percentage calculations
///
/// Basis points are a unit of measure for percentages, where 1 basis point = 0.01%.
/// This constant represents 10,000 basis points = 100%, used for fee calculations.
///
/// # Examples
/// ```ignore
/// // Calculate 7% creator fee (700 basis points):
/// let fee_bps: u16 = 700;
/// let price: u128 = 1_000_000;
/// let fee = price * u128::from(fee_bps) / FEE_BASIS_POINTS_DIVISOR;
/// // fee = 70_000
/// ```
pub const FEE_BASIS_POINTS_DIVISOR: u128 = 10_000;

/// Maximum rate for the creator fee, the admin fee and the creator royalty (25%)
///
/// Each rate is capped individually at construction. Role updates never touch
/// the rates, so the cap holds for the lifetime of a ledger.
pub const MAX_FEE_BPS: u16 = 2_500;

/// Number of units pre-minted to the creator at construction
pub const CREATOR_PRE_MINT: u64 = 1;

/// Number of units pre-minted to the referrer at construction, when one is configured
pub const REFERRER_PRE_MINT: u64 = 1;

/// Fixed-point scale applied inside the square root of the late curve regime
///
/// `isqrt(SQRT_SCALE * x)` equals `sqrt(x) * SQRT_SCALE_ROOT` truncated, so three
/// decimal digits of the root survive the integer square root.
pub const SQRT_SCALE: u128 = 1_000_000;

/// Square root of [`SQRT_SCALE`]
pub const SQRT_SCALE_ROOT: u128 = 1_000;

/// Largest number of units a single bulk purchase or batch quote may cover
///
/// Batches are priced unit by unit, so the cap bounds the work and memory of
/// one call.
pub const MAX_BATCH_UNITS: u64 = 1_000;
