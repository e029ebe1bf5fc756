use bondsim_ports::{BondingCurve, CurveError, CurveResult, bisect_tokens_out};
use serde::{Deserialize, Serialize};

/// Logarithmic bonding curve: `price(s) = a * ln(s + b)`
///
/// `b > 1` keeps the opening price strictly positive. Purchases are
/// solved by bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogarithmicCurve {
    /// Scale
    pub a: f64,
    /// Supply offset
    pub b: f64,
}

impl Default for LogarithmicCurve {
    fn default() -> Self {
        Self { a: 1.0, b: 10.0 }
    }
}

impl LogarithmicCurve {
    pub fn new(a: f64, b: f64) -> CurveResult<Self> {
        let curve = Self { a, b };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> CurveResult<()> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(CurveError::invalid("a", self.a, "must be finite and positive"));
        }
        if !self.b.is_finite() || self.b <= 1.0 {
            return Err(CurveError::invalid(
                "b",
                self.b,
                "must be finite and greater than 1",
            ));
        }
        Ok(())
    }

    /// Antiderivative `a * ((s + b) * ln(s + b) - (s + b))`
    fn antiderivative(&self, supply: f64) -> f64 {
        let x = supply + self.b;
        self.a * (x * x.ln() - x)
    }
}

impl BondingCurve for LogarithmicCurve {
    fn price(&self, supply: f64) -> f64 {
        self.a * (supply + self.b).ln()
    }

    fn cost(&self, from: f64, to: f64) -> f64 {
        (self.antiderivative(to) - self.antiderivative(from)).max(0.0)
    }

    fn tokens_out(&self, supply: f64, currency_in: f64, max_tokens: f64) -> f64 {
        bisect_tokens_out(self, supply, currency_in, max_tokens)
    }

    fn name(&self) -> &str {
        "Logarithmic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondsim_ports::BISECTION_TOLERANCE;

    #[test]
    fn test_price() {
        let curve = LogarithmicCurve::default();
        assert_relative_eq!(curve.price(0.0), 10.0_f64.ln());
        assert!(curve.price(100.0) > curve.price(0.0));
    }

    #[test]
    fn test_cost_matches_midpoint_estimate() {
        let curve = LogarithmicCurve::default();
        // Over a narrow band the integral is close to width * midpoint price
        let cost = curve.cost(100.0, 101.0);
        assert_relative_eq!(cost, curve.price(100.5), max_relative = 1e-4);
    }

    #[test]
    fn test_bisection_inverse() {
        let curve = LogarithmicCurve::default();
        let tokens = curve.tokens_out(0.0, 500.0, 1_000_000.0);
        let spent = curve.cost(0.0, tokens);
        assert!(spent <= 500.0);
        assert!(500.0 - spent <= curve.price(tokens + BISECTION_TOLERANCE) * BISECTION_TOLERANCE);
    }

    #[test]
    fn test_rejects_offset_at_or_below_one() {
        assert!(LogarithmicCurve::new(1.0, 1.0).is_err());
        assert!(LogarithmicCurve::new(1.0, 0.5).is_err());
        assert!(LogarithmicCurve::new(0.0, 10.0).is_err());
    }
}
