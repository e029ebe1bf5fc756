//! Bonding curve shapes
//!
//! Each shape implements [`BondingCurve`] on its own; [`CurveShape`] is the
//! tagged union used in configuration and by [`crate::Curve`].

mod exponential;
mod linear;
mod logarithmic;
mod polynomial;

pub use exponential::ExponentialCurve;
pub use linear::LinearCurve;
pub use logarithmic::LogarithmicCurve;
pub use polynomial::PolynomialCurve;

use bondsim_ports::{BondingCurve, CurveResult};
use serde::{Deserialize, Serialize};

/// One of the supported price functions with its parameters
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "exponential", "a": 0.1, "b": 0.001}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveShape {
    Linear(LinearCurve),
    Exponential(ExponentialCurve),
    Polynomial(PolynomialCurve),
    Logarithmic(LogarithmicCurve),
}

impl Default for CurveShape {
    fn default() -> Self {
        CurveShape::Linear(LinearCurve::default())
    }
}

impl CurveShape {
    /// Check shape parameters
    pub fn validate(&self) -> CurveResult<()> {
        match self {
            CurveShape::Linear(c) => c.validate(),
            CurveShape::Exponential(c) => c.validate(),
            CurveShape::Polynomial(c) => c.validate(),
            CurveShape::Logarithmic(c) => c.validate(),
        }
    }

    fn as_curve(&self) -> &dyn BondingCurve {
        match self {
            CurveShape::Linear(c) => c,
            CurveShape::Exponential(c) => c,
            CurveShape::Polynomial(c) => c,
            CurveShape::Logarithmic(c) => c,
        }
    }
}

impl From<LinearCurve> for CurveShape {
    fn from(curve: LinearCurve) -> Self {
        CurveShape::Linear(curve)
    }
}

impl From<ExponentialCurve> for CurveShape {
    fn from(curve: ExponentialCurve) -> Self {
        CurveShape::Exponential(curve)
    }
}

impl From<PolynomialCurve> for CurveShape {
    fn from(curve: PolynomialCurve) -> Self {
        CurveShape::Polynomial(curve)
    }
}

impl From<LogarithmicCurve> for CurveShape {
    fn from(curve: LogarithmicCurve) -> Self {
        CurveShape::Logarithmic(curve)
    }
}

impl BondingCurve for CurveShape {
    fn price(&self, supply: f64) -> f64 {
        self.as_curve().price(supply)
    }

    fn cost(&self, from: f64, to: f64) -> f64 {
        self.as_curve().cost(from, to)
    }

    fn tokens_out(&self, supply: f64, currency_in: f64, max_tokens: f64) -> f64 {
        self.as_curve().tokens_out(supply, currency_in, max_tokens)
    }

    fn name(&self) -> &str {
        self.as_curve().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_shape() {
        let shape: CurveShape =
            serde_json::from_str(r#"{"type": "exponential", "a": 0.2, "b": 0.002}"#).unwrap();
        assert_eq!(shape, CurveShape::Exponential(ExponentialCurve { a: 0.2, b: 0.002 }));
        assert_eq!(shape.name(), "Exponential");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let shape: CurveShape = serde_json::from_str(r#"{"type": "polynomial"}"#).unwrap();
        assert_eq!(shape, CurveShape::Polynomial(PolynomialCurve::default()));
    }

    #[test]
    fn test_validate_dispatches() {
        let shape = CurveShape::Logarithmic(LogarithmicCurve { a: 1.0, b: 0.0 });
        assert!(shape.validate().is_err());
        assert!(CurveShape::default().validate().is_ok());
    }
}
