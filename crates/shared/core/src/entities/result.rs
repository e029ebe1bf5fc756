use serde::Serialize;

use super::{SkipReason, SkippedTrade, Trade};

/// Outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub trades: Vec<Trade>,
    pub graduated: bool,
    /// Quoted price at the final supply
    pub final_price: f64,
    pub final_tokens_sold: f64,
    pub final_currency_raised: f64,
    /// Sum of gross currency amounts
    pub total_volume: f64,
    pub tax_collected: f64,
    /// Intents that were generated but not executed
    pub skipped: Vec<SkippedTrade>,
}

impl SimulationResult {
    pub fn num_trades(&self) -> usize {
        self.trades.len()
    }

    pub fn first_trade(&self) -> Option<&Trade> {
        self.trades.first()
    }

    pub fn last_trade(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// Executed prices in trade order
    pub fn prices(&self) -> Vec<f64> {
        self.trades.iter().map(|t| t.price).collect()
    }

    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }

    /// Skips caused by the curve rejecting a trade (as opposed to empty sells)
    pub fn rejected_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Rejected(_)))
            .count()
    }
}
