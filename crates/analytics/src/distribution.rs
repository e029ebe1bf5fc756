//! Trade size distribution analysis

use bondsim_core::SimulationResult;
use serde::{Deserialize, Serialize};

use crate::stats::{mean, skew_kurtosis, std_dev};

/// Trades larger than `mean + WHALE_SIGMAS * std` count as whales
pub const WHALE_SIGMAS: f64 = 3.0;

/// Shape of the trade size distribution of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeDistribution {
    pub avg_trade_size: f64,
    pub std_trade_size: f64,
    /// Zero unless there are more than 3 trades with non-zero spread
    pub skewness: f64,
    /// Excess kurtosis; zero under the same conditions as skewness
    pub kurtosis: f64,
    /// Fraction of trades more than three std devs above the mean
    pub whale_trade_ratio: f64,
}

/// Analyze the distribution of trade sizes (currency amounts)
pub fn analyze_trade_distribution(result: &SimulationResult) -> TradeDistribution {
    if result.trades.is_empty() {
        return TradeDistribution::default();
    }

    let sizes: Vec<f64> = result.trades.iter().map(|t| t.currency_amount).collect();
    let avg = mean(&sizes);
    let sd = std_dev(&sizes);

    let (skewness, kurtosis) = if sizes.len() > 3 {
        skew_kurtosis(&sizes).unwrap_or((0.0, 0.0))
    } else {
        (0.0, 0.0)
    };

    let whale_trade_ratio = if sd > 0.0 {
        let threshold = avg + WHALE_SIGMAS * sd;
        sizes.iter().filter(|&&s| s > threshold).count() as f64 / sizes.len() as f64
    } else {
        0.0
    };

    TradeDistribution {
        avg_trade_size: avg,
        std_trade_size: sd,
        skewness,
        kurtosis,
        whale_trade_ratio,
    }
}
