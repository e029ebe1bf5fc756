use bondsim_ports::{BondingCurve, CurveError, CurveResult, PRICE_FLOOR, bisect_tokens_out};
use serde::{Deserialize, Serialize};

/// Polynomial bonding curve: `price(s) = max(floor, sum(c_i * s^i))`
///
/// No closed-form inverse; purchases are solved by bisection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolynomialCurve {
    /// Coefficients `c_0..c_n`, lowest degree first
    pub coefficients: Vec<f64>,
}

impl Default for PolynomialCurve {
    fn default() -> Self {
        Self {
            coefficients: vec![1.0, 0.1],
        }
    }
}

impl PolynomialCurve {
    pub fn new(coefficients: Vec<f64>) -> CurveResult<Self> {
        let curve = Self { coefficients };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> CurveResult<()> {
        if self.coefficients.is_empty() {
            return Err(CurveError::invalid(
                "coefficients",
                0.0,
                "must contain at least one coefficient",
            ));
        }
        if let Some(&c) = self.coefficients.iter().find(|c| !c.is_finite()) {
            return Err(CurveError::invalid("coefficient", c, "must be finite"));
        }
        Ok(())
    }

    /// Highest power of supply in the price function
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

impl BondingCurve for PolynomialCurve {
    fn price(&self, supply: f64) -> f64 {
        let price: f64 = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| c * supply.powi(i as i32))
            .sum();
        price.max(PRICE_FLOOR)
    }

    fn cost(&self, from: f64, to: f64) -> f64 {
        let cost: f64 = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let n = i as i32 + 1;
                c / n as f64 * (to.powi(n) - from.powi(n))
            })
            .sum();
        cost.max(0.0)
    }

    fn tokens_out(&self, supply: f64, currency_in: f64, max_tokens: f64) -> f64 {
        bisect_tokens_out(self, supply, currency_in, max_tokens)
    }

    fn name(&self) -> &str {
        "Polynomial"
    }
}
