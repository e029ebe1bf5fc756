//! Per-run market quality metrics
//!
//! # Metrics
//!
//! - **Volatility**: std dev of log returns between consecutive trade prices
//! - **Slippage**: mean and max signed slippage
//! - **Liquidity Depth**: % of trades with |slippage| under 1%
//! - **Price Impact**: price drift from first to last trade per unit of volume
//! - **Market Efficiency**: agreement between recorded slippage and realized drift
//! - **Graduation Efficiency**: progress towards graduation (heuristic)

use bondsim_core::SimulationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::{SummaryStats, mean, std_dev};

/// Trades with |slippage| below this count towards liquidity depth
pub const LOW_SLIPPAGE_THRESHOLD: f64 = 0.01;

/// Metric names in reporting order
pub const METRIC_NAMES: [&str; 7] = [
    "volatility",
    "avg_slippage",
    "max_slippage",
    "liquidity_depth",
    "price_impact",
    "market_efficiency",
    "graduation_efficiency",
];

/// Market quality metrics for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeMetrics {
    pub volatility: f64,
    pub avg_slippage: f64,
    pub max_slippage: f64,
    /// Percentage (0-100)
    pub liquidity_depth: f64,
    pub price_impact: f64,
    pub market_efficiency: f64,
    /// Heuristic kept for compatibility with existing reports; it compares
    /// final raise against the first trade's raise times trade count, which
    /// has no principled meaning across parameter regimes. Do not rely on it
    /// as a validated measure.
    pub graduation_efficiency: f64,
}

impl TradeMetrics {
    /// `(name, value)` pairs in [`METRIC_NAMES`] order
    pub fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("volatility", self.volatility),
            ("avg_slippage", self.avg_slippage),
            ("max_slippage", self.max_slippage),
            ("liquidity_depth", self.liquidity_depth),
            ("price_impact", self.price_impact),
            ("market_efficiency", self.market_efficiency),
            ("graduation_efficiency", self.graduation_efficiency),
        ]
    }

    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.named()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Generate summary report
    pub fn summary(&self) -> String {
        format!(
            "Volatility: {:.4}\n\
             Slippage: avg {:.4}%, max {:.4}%\n\
             Liquidity Depth: {:.1}%\n\
             Price Impact: {:.6e}\n\
             Market Efficiency: {:.4}\n\
             Graduation Efficiency: {:.4}",
            self.volatility,
            self.avg_slippage * 100.0,
            self.max_slippage * 100.0,
            self.liquidity_depth,
            self.price_impact,
            self.market_efficiency,
            self.graduation_efficiency,
        )
    }
}

/// Calculate market quality metrics for one run
///
/// A run without trades yields all zeros.
pub fn calculate_metrics(result: &SimulationResult) -> TradeMetrics {
    let trades = &result.trades;
    if trades.is_empty() {
        return TradeMetrics::default();
    }

    let prices = result.prices();
    let first_price = prices[0];

    // Log returns (pairs with a non-positive price carry no return)
    let log_returns: Vec<f64> = prices
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0)
        .map(|w| w[1].ln() - w[0].ln())
        .collect();
    let volatility = if prices.len() > 1 {
        std_dev(&log_returns)
    } else {
        0.0
    };

    let slippages: Vec<f64> = trades.iter().map(|t| t.slippage).collect();
    let avg_slippage = mean(&slippages);
    let max_slippage = slippages.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let low_slippage = trades
        .iter()
        .filter(|t| t.slippage.abs() < LOW_SLIPPAGE_THRESHOLD)
        .count();
    let liquidity_depth = low_slippage as f64 / trades.len() as f64 * 100.0;

    let price_impact = if result.total_volume > 0.0 && prices.len() > 1 {
        (prices[prices.len() - 1] - first_price) / result.total_volume
    } else {
        0.0
    };

    let deviations: Vec<f64> = trades
        .iter()
        .filter(|t| t.currency_amount > 0.0)
        .map(|t| {
            let realized = if first_price > 0.0 {
                (t.price - first_price) / first_price
            } else {
                0.0
            };
            (realized - t.slippage).abs()
        })
        .collect();
    let market_efficiency = if deviations.is_empty() {
        1.0
    } else {
        1.0 - mean(&deviations)
    };

    let graduation_efficiency = if result.graduated {
        1.0
    } else {
        let projected = trades[0].currency_raised * trades.len() as f64;
        if projected > 0.0 {
            (result.final_currency_raised / projected).min(1.0)
        } else {
            0.0
        }
    };

    TradeMetrics {
        volatility,
        avg_slippage,
        max_slippage,
        liquidity_depth,
        price_impact,
        market_efficiency,
        graduation_efficiency,
    }
}

/// Mean/std/min/max/median of each metric across runs, keyed by metric name
pub fn calculate_aggregate_metrics(
    results: &[SimulationResult],
) -> BTreeMap<&'static str, SummaryStats> {
    let all: Vec<TradeMetrics> = results.iter().map(calculate_metrics).collect();

    METRIC_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let values: Vec<f64> = all.iter().map(|m| m.named()[i].1).collect();
            (name, SummaryStats::from_values(&values))
        })
        .collect()
}
