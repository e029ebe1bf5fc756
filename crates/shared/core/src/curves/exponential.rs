use bondsim_ports::{BondingCurve, CurveError, CurveResult};
use serde::{Deserialize, Serialize};

/// Exponential bonding curve: `price(s) = a * e^(b * s)`
///
/// With `b = 0` the curve degenerates to a flat price of `a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExponentialCurve {
    /// Price at zero supply
    pub a: f64,
    /// Growth rate per token
    pub b: f64,
}

impl Default for ExponentialCurve {
    fn default() -> Self {
        Self { a: 0.1, b: 0.001 }
    }
}

impl ExponentialCurve {
    pub fn new(a: f64, b: f64) -> CurveResult<Self> {
        let curve = Self { a, b };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> CurveResult<()> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(CurveError::invalid("a", self.a, "must be finite and positive"));
        }
        if !self.b.is_finite() || self.b < 0.0 {
            return Err(CurveError::invalid(
                "b",
                self.b,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

impl BondingCurve for ExponentialCurve {
    fn price(&self, supply: f64) -> f64 {
        self.a * (self.b * supply).exp()
    }

    fn cost(&self, from: f64, to: f64) -> f64 {
        if self.b == 0.0 {
            return (self.a * (to - from)).max(0.0);
        }
        // (a/b) * (e^(b*to) - e^(b*from)) factored to keep precision for short spans
        let cost = (self.a / self.b) * (self.b * from).exp() * (self.b * (to - from)).exp_m1();
        cost.max(0.0)
    }

    fn tokens_out(&self, supply: f64, currency_in: f64, _max_tokens: f64) -> f64 {
        if currency_in <= 0.0 {
            return 0.0;
        }
        if self.b == 0.0 {
            return currency_in / self.a;
        }
        // e^(b*(s+d)) = amount*b/a + e^(b*s)  =>  d = ln(1 + amount*b / (a*e^(b*s))) / b
        let ratio = currency_in * self.b / self.price(supply);
        ratio.ln_1p() / self.b
    }

    fn name(&self) -> &str {
        "Exponential"
    }
}
