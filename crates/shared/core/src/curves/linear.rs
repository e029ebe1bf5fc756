use bondsim_ports::{BondingCurve, CurveError, CurveResult, PRICE_FLOOR};
use serde::{Deserialize, Serialize};

/// Linear bonding curve: `price(s) = k * s / multiplier`
///
/// The first token is quoted at [`PRICE_FLOOR`] instead of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearCurve {
    /// Slope numerator
    pub k: f64,
    /// Slope denominator (scales supply into price units)
    pub multiplier: f64,
}

impl Default for LinearCurve {
    fn default() -> Self {
        Self {
            k: 2.0,
            multiplier: 10_000_000.0,
        }
    }
}

impl LinearCurve {
    pub fn new(k: f64, multiplier: f64) -> CurveResult<Self> {
        let curve = Self { k, multiplier };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> CurveResult<()> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(CurveError::invalid("k", self.k, "must be finite and positive"));
        }
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(CurveError::invalid(
                "multiplier",
                self.multiplier,
                "must be finite and positive",
            ));
        }
        Ok(())
    }

    fn slope(&self) -> f64 {
        self.k / self.multiplier
    }
}

impl BondingCurve for LinearCurve {
    fn price(&self, supply: f64) -> f64 {
        if supply <= 0.0 {
            return PRICE_FLOOR;
        }
        self.slope() * supply
    }

    fn cost(&self, from: f64, to: f64) -> f64 {
        let cost = (self.slope() / 2.0) * (to * to - from * from);
        cost.max(0.0)
    }

    fn tokens_out(&self, supply: f64, currency_in: f64, _max_tokens: f64) -> f64 {
        if currency_in <= 0.0 {
            return 0.0;
        }
        // (s + d)^2 = s^2 + r  =>  d = r / (sqrt(s^2 + r) + s)
        let r = 2.0 * currency_in / self.slope();
        r / ((supply * supply + r).sqrt() + supply)
    }

    fn name(&self) -> &str {
        "Linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_values() {
        let curve = LinearCurve::new(2.0, 1e7).unwrap();
        assert_eq!(curve.price(0.0), 0.0001);
        assert_relative_eq!(curve.price(1e6), 0.2, max_relative = 1e-12);
        assert_relative_eq!(curve.cost(0.0, 1e6), 100_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_matches_cost() {
        let curve = LinearCurve::default();
        for (supply, amount) in [(0.0, 10.0), (5e5, 250.0), (3e7, 1e4)] {
            let tokens = curve.tokens_out(supply, amount, f64::INFINITY);
            assert_relative_eq!(
                curve.cost(supply, supply + tokens),
                amount,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_zero_amount_buys_nothing() {
        let curve = LinearCurve::default();
        assert_eq!(curve.tokens_out(0.0, 0.0, 1e9), 0.0);
    }

    #[test]
    fn test_rejects_zero_multiplier() {
        let err = LinearCurve::new(2.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            CurveError::InvalidParameter {
                name: "multiplier",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_slope() {
        assert!(LinearCurve::new(-1.0, 1e7).is_err());
        assert!(LinearCurve::new(f64::NAN, 1e7).is_err());
    }
}
