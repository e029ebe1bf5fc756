use bondsim_ports::TradeError;
use serde::{Deserialize, Serialize};

use super::Side;

/// One executed exchange against the curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    /// Gross spend for buys, net proceeds for sells
    pub currency_amount: f64,
    pub token_amount: f64,
    /// Executed price (currency per token)
    pub price: f64,
    /// Signed deviation from the pre-trade quote (see [`Side::slippage`])
    pub slippage: f64,
    /// Tokens sold after the trade
    pub total_supply: f64,
    /// Currency raised after the trade
    pub currency_raised: f64,
    /// Iteration of the run that produced this trade
    pub index: usize,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }
}

/// Why a generated trade intent did not execute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "error", rename_all = "snake_case")]
pub enum SkipReason {
    /// Sell sized down to no tokens
    EmptySell,
    /// Curve refused the trade
    Rejected(TradeError),
}

/// A trade intent that was dropped without touching curve state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTrade {
    pub index: usize,
    pub side: Side,
    pub reason: SkipReason,
}
