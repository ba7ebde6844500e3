//! Pricing curves
//!
//! A curve maps a unit's sequence number to a price. Curves are pure: no storage,
//! no clock, no side effects, so the same `n` always prices the same.
//!
//! The production curve is [`SigmoidCurve`]: a base price, a linear term and a
//! two-regime growth term that is quadratic up to the inflection point and
//! square-root shaped after it. [`LinearCurve`] is a simpler collaborator used by
//! tests and by deployments that want flat marginal growth.

use serde::{Deserialize, Serialize};

use crate::constants::{SQRT_SCALE, SQRT_SCALE_ROOT};
use crate::errors::CurveError;

/// Trait implemented by every pricing curve the ledger can be built with
pub trait PricingCurve {
    /// Price of the unit at sequence position `n`
    ///
    /// # Errors
    /// Returns [`CurveError::Overflow`] if the price does not fit in `u128`.
    fn price_for_unit(&self, n: u64) -> Result<u128, CurveError>;
}

impl<T: PricingCurve + ?Sized> PricingCurve for &T {
    fn price_for_unit(&self, n: u64) -> Result<u128, CurveError> {
        (**self).price_for_unit(n)
    }
}

impl<T: PricingCurve + ?Sized> PricingCurve for Box<T> {
    fn price_for_unit(&self, n: u64) -> Result<u128, CurveError> {
        (**self).price_for_unit(n)
    }
}

/// Parameters of the sigmoid curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Price floor, charged for every unit
    pub base_price: u128,
    /// Increment per unit of the linear term
    pub linear_slope: u128,
    /// Value of the growth term at the inflection point
    pub inflection_price: u128,
    /// Unit count at which growth switches from quadratic to square root
    pub inflection_point: u64,
}

/// Production curve: `base + slope·k + sigmoid(k)`
///
/// With `p` the inflection point and `P` the inflection price:
///
/// - `sigmoid(k) = ⌊P / p²⌋ · k²` for `k < p`
/// - `sigmoid(k) = P · ⌊√(10⁶ · (4k − 3p) / p)⌋ / 10³` for `k ≥ p`
///
/// The late regime equals `P` at `k = p` and starts with the same slope as the
/// quadratic regime ends with, so the curve has no visible kink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigmoidCurve {
    params: CurveParams,
    quadratic_coefficient: u128,
}

impl SigmoidCurve {
    /// Validates parameters and precomputes the quadratic coefficient
    ///
    /// # Errors
    /// - [`CurveError::InvalidInflectionPoint`] if `inflection_point` is zero
    /// - [`CurveError::InflectionPriceTooLow`] if `inflection_price < inflection_point²`
    pub fn new(params: CurveParams) -> Result<Self, CurveError> {
        if params.inflection_point == 0 {
            return Err(CurveError::InvalidInflectionPoint);
        }

        let point = u128::from(params.inflection_point);
        let point_squared = point
            .checked_mul(point)
            .ok_or(CurveError::InvalidInflectionPoint)?;

        if params.inflection_price < point_squared {
            return Err(CurveError::InflectionPriceTooLow {
                inflection_price: params.inflection_price,
                minimum: point_squared,
            });
        }

        let quadratic_coefficient = params
            .inflection_price
            .checked_div(point_squared)
            .ok_or(CurveError::InvalidInflectionPoint)?;

        Ok(Self {
            params,
            quadratic_coefficient,
        })
    }

    /// Curve parameters
    #[must_use]
    pub const fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Two-regime growth term at zero-based position `k`
    fn sigmoid(&self, k: u64) -> Option<u128> {
        let k_wide = u128::from(k);
        let point = u128::from(self.params.inflection_point);

        if k < self.params.inflection_point {
            return self
                .quadratic_coefficient
                .checked_mul(k_wide)?
                .checked_mul(k_wide);
        }

        // 4k - 3p >= p > 0 in this regime
        let radicand = k_wide
            .checked_mul(4)?
            .checked_sub(point.checked_mul(3)?)?
            .checked_mul(SQRT_SCALE)?
            .checked_div(point)?;

        self.params
            .inflection_price
            .checked_mul(isqrt(radicand))?
            .checked_div(SQRT_SCALE_ROOT)
    }
}

impl PricingCurve for SigmoidCurve {
    fn price_for_unit(&self, n: u64) -> Result<u128, CurveError> {
        let linear = self.params.linear_slope.checked_mul(u128::from(n));
        let sigmoid = self.sigmoid(n);

        linear
            .zip(sigmoid)
            .and_then(|(linear, sigmoid)| {
                self.params
                    .base_price
                    .checked_add(linear)?
                    .checked_add(sigmoid)
            })
            .ok_or(CurveError::Overflow { unit: n })
    }
}

/// Flat-growth curve: `base + slope·n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCurve {
    /// Price of unit 0
    pub base_price: u128,
    /// Increment per unit
    pub slope: u128,
}

impl PricingCurve for LinearCurve {
    fn price_for_unit(&self, n: u64) -> Result<u128, CurveError> {
        self.slope
            .checked_mul(u128::from(n))
            .and_then(|linear| self.base_price.checked_add(linear))
            .ok_or(CurveError::Overflow { unit: n })
    }
}

/// Curve selection as it appears in deployment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveConfig {
    /// Production two-regime curve
    Sigmoid(CurveParams),
    /// Linear curve
    Linear(LinearCurve),
}

impl CurveConfig {
    /// Validates the configuration and builds the curve
    pub fn build(self) -> Result<ConfiguredCurve, CurveError> {
        match self {
            Self::Sigmoid(params) => SigmoidCurve::new(params).map(ConfiguredCurve::Sigmoid),
            Self::Linear(curve) => Ok(ConfiguredCurve::Linear(curve)),
        }
    }
}

/// A curve chosen at runtime from [`CurveConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredCurve {
    Sigmoid(SigmoidCurve),
    Linear(LinearCurve),
}

impl PricingCurve for ConfiguredCurve {
    fn price_for_unit(&self, n: u64) -> Result<u128, CurveError> {
        match self {
            Self::Sigmoid(curve) => curve.price_for_unit(n),
            Self::Linear(curve) => curve.price_for_unit(n),
        }
    }
}

/// Integer square root, Newton's method. Returns `⌊√n⌋`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // x stays in 1..=n, divisions never hit zero
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = n.div_ceil(2);
    while y < x {
        x = y;
        y = x.saturating_add(n / x) / 2;
    }
    x
}
