use serde::{Deserialize, Serialize};

/// Trade direction relative to the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Currency in, tokens issued
    Buy,
    /// Tokens burned, currency returned
    Sell,
}

impl Side {
    /// Signed slippage of an execution against the pre-trade quote
    ///
    /// Positive means the curve was favoured: a buyer paid above the quote
    /// or a seller received below it.
    pub fn slippage(&self, expected: f64, executed: f64) -> f64 {
        if expected <= 0.0 {
            return 0.0;
        }
        match self {
            Side::Buy => (executed - expected) / expected,
            Side::Sell => (expected - executed) / expected,
        }
    }
}
