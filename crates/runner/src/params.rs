//! Trade generation parameters

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Parameters of the random trade stream for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeParams {
    /// Maximum number of trade intents to generate
    pub num_trades: usize,
    /// Mean trade size in currency units
    pub avg_trade_size: f64,
    /// Standard deviation of trade size
    pub trade_size_std: f64,
    /// Probability an intent is a sell (0-1)
    pub sell_probability: f64,
    /// Probability an intent is a whale trade (0-1)
    pub whale_probability: f64,
    /// Scale applied to mean and std for whale trades
    pub whale_multiplier: f64,
}

impl Default for TradeParams {
    fn default() -> Self {
        Self {
            num_trades: 1000,
            avg_trade_size: 50.0,
            trade_size_std: 20.0,
            sell_probability: 0.0,
            whale_probability: 0.05,
            whale_multiplier: 10.0,
        }
    }
}

impl TradeParams {
    pub fn new(num_trades: usize, avg_trade_size: f64, trade_size_std: f64) -> Self {
        Self {
            num_trades,
            avg_trade_size,
            trade_size_std,
            ..Default::default()
        }
    }

    pub fn with_sell_probability(mut self, probability: f64) -> Self {
        self.sell_probability = probability;
        self
    }

    pub fn with_whales(mut self, probability: f64, multiplier: f64) -> Self {
        self.whale_probability = probability;
        self.whale_multiplier = multiplier;
        self
    }

    /// Check the parameters can drive a run
    pub fn validate(&self) -> Result<()> {
        if !self.avg_trade_size.is_finite() {
            return Err(SimulationError::InvalidParams(format!(
                "avg_trade_size must be finite, got {}",
                self.avg_trade_size
            )));
        }
        if !self.trade_size_std.is_finite() || self.trade_size_std < 0.0 {
            return Err(SimulationError::InvalidParams(format!(
                "trade_size_std must be finite and non-negative, got {}",
                self.trade_size_std
            )));
        }
        for (name, p) in [
            ("sell_probability", self.sell_probability),
            ("whale_probability", self.whale_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimulationError::InvalidParams(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        if !self.whale_multiplier.is_finite() || self.whale_multiplier <= 0.0 {
            return Err(SimulationError::InvalidParams(format!(
                "whale_multiplier must be finite and positive, got {}",
                self.whale_multiplier
            )));
        }
        Ok(())
    }
}
