//! Validated curve: supply cap, graduation threshold and shape

use crate::curves::{
    CurveShape, ExponentialCurve, LinearCurve, LogarithmicCurve, PolynomialCurve,
};
use bondsim_ports::{BondingCurve, CurveError, CurveResult};
use serde::Serialize;

/// Immutable bonding curve definition
///
/// Holds no trading progress; open a [`crate::TradingSession`] to trade
/// against it. Parameters are checked once at construction so a bad
/// curve never reaches the simulation loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    total_supply: f64,
    graduation_threshold: f64,
    shape: CurveShape,
}

impl Curve {
    pub fn new(
        total_supply: f64,
        graduation_threshold: f64,
        shape: impl Into<CurveShape>,
    ) -> CurveResult<Self> {
        if !total_supply.is_finite() || total_supply <= 0.0 {
            return Err(CurveError::invalid(
                "total_supply",
                total_supply,
                "must be finite and positive",
            ));
        }
        if !graduation_threshold.is_finite() || graduation_threshold <= 0.0 {
            return Err(CurveError::invalid(
                "graduation_threshold",
                graduation_threshold,
                "must be finite and positive",
            ));
        }

        let shape = shape.into();
        shape.validate()?;

        Ok(Self {
            total_supply,
            graduation_threshold,
            shape,
        })
    }

    pub fn linear(
        total_supply: f64,
        graduation_threshold: f64,
        k: f64,
        multiplier: f64,
    ) -> CurveResult<Self> {
        Self::new(
            total_supply,
            graduation_threshold,
            LinearCurve::new(k, multiplier)?,
        )
    }

    pub fn exponential(
        total_supply: f64,
        graduation_threshold: f64,
        a: f64,
        b: f64,
    ) -> CurveResult<Self> {
        Self::new(
            total_supply,
            graduation_threshold,
            ExponentialCurve::new(a, b)?,
        )
    }

    pub fn polynomial(
        total_supply: f64,
        graduation_threshold: f64,
        coefficients: Vec<f64>,
    ) -> CurveResult<Self> {
        Self::new(
            total_supply,
            graduation_threshold,
            PolynomialCurve::new(coefficients)?,
        )
    }

    pub fn logarithmic(
        total_supply: f64,
        graduation_threshold: f64,
        a: f64,
        b: f64,
    ) -> CurveResult<Self> {
        Self::new(
            total_supply,
            graduation_threshold,
            LogarithmicCurve::new(a, b)?,
        )
    }

    pub fn total_supply(&self) -> f64 {
        self.total_supply
    }

    pub fn graduation_threshold(&self) -> f64 {
        self.graduation_threshold
    }

    pub fn shape(&self) -> &CurveShape {
        &self.shape
    }

    /// Tokens issued for `currency_in` at `supply`, bounded by the remaining supply
    /// for shapes solved numerically
    pub fn tokens_for(&self, supply: f64, currency_in: f64) -> f64 {
        let remaining = (self.total_supply - supply).max(0.0);
        self.shape.tokens_out(supply, currency_in, remaining)
    }

    /// Evenly spaced `(supply, price)` points over `[0, total_supply]`
    pub fn sample(&self, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => Vec::new(),
            1 => vec![(0.0, self.price(0.0))],
            _ => {
                let step = self.total_supply / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let supply = step * i as f64;
                        (supply, self.price(supply))
                    })
                    .collect()
            }
        }
    }
}

impl BondingCurve for Curve {
    fn price(&self, supply: f64) -> f64 {
        self.shape.price(supply)
    }

    fn cost(&self, from: f64, to: f64) -> f64 {
        self.shape.cost(from, to)
    }

    fn tokens_out(&self, supply: f64, currency_in: f64, max_tokens: f64) -> f64 {
        self.shape.tokens_out(supply, currency_in, max_tokens)
    }

    fn name(&self) -> &str {
        self.shape.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_non_positive_supply() {
        let err = Curve::new(0.0, 10_000.0, LinearCurve::default()).unwrap_err();
        assert!(matches!(
            err,
            CurveError::InvalidParameter {
                name: "total_supply",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        assert!(Curve::new(1e9, -1.0, LinearCurve::default()).is_err());
        assert!(Curve::new(1e9, f64::NAN, LinearCurve::default()).is_err());
    }

    #[test]
    fn test_rejects_invalid_shape() {
        let shape = LinearCurve {
            k: 2.0,
            multiplier: 0.0,
        };
        assert!(Curve::new(1e9, 10_000.0, shape).is_err());
    }

    #[test]
    fn test_sample_spans_supply() {
        let curve = Curve::linear(1_000.0, 100.0, 2.0, 1_000.0).unwrap();
        let points = curve.sample(5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].0, 0.0);
        assert_relative_eq!(points[4].0, 1_000.0);
        assert_relative_eq!(points[4].1, 2.0);
        assert!(curve.sample(0).is_empty());
    }

    #[test]
    fn test_tokens_for_bounded_by_remaining_supply() {
        let curve = Curve::polynomial(100.0, 1e9, vec![1.0]).unwrap();
        // Flat price 1.0: 1000 currency would buy 1000 tokens but only 60 remain
        let tokens = curve.tokens_for(40.0, 1_000.0);
        assert!(tokens <= 60.0);
    }
}
