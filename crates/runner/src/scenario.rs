//! Pre-defined market scenarios

use serde::{Deserialize, Serialize};

use crate::params::TradeParams;

/// Pre-defined trading environments for scenario comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketScenario {
    /// Few, small trades
    BearMarket,
    /// Moderate flow
    NormalMarket,
    /// Many large trades with frequent whales
    BullMarket,
    /// Whales dominate the flow
    WhaleDominated,
}

impl MarketScenario {
    pub fn all() -> [MarketScenario; 4] {
        [
            MarketScenario::BearMarket,
            MarketScenario::NormalMarket,
            MarketScenario::BullMarket,
            MarketScenario::WhaleDominated,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarketScenario::BearMarket => "bear_market",
            MarketScenario::NormalMarket => "normal_market",
            MarketScenario::BullMarket => "bull_market",
            MarketScenario::WhaleDominated => "whale_dominated",
        }
    }

    /// Trade stream for this scenario (buy-only)
    pub fn params(&self) -> TradeParams {
        match self {
            MarketScenario::BearMarket => TradeParams::new(500, 20.0, 10.0).with_whales(0.02, 10.0),
            MarketScenario::NormalMarket => {
                TradeParams::new(1000, 50.0, 20.0).with_whales(0.05, 10.0)
            }
            MarketScenario::BullMarket => {
                TradeParams::new(2000, 100.0, 50.0).with_whales(0.1, 10.0)
            }
            MarketScenario::WhaleDominated => {
                TradeParams::new(500, 50.0, 30.0).with_whales(0.3, 20.0)
            }
        }
    }
}

/// Headline figures of one scenario run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub graduated: bool,
    pub final_price: f64,
    pub total_volume: f64,
    pub num_trades: usize,
    pub avg_trade_size: f64,
    pub max_slippage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenarios_have_valid_params() {
        for scenario in MarketScenario::all() {
            assert!(scenario.params().validate().is_ok(), "{}", scenario.name());
            assert_eq!(scenario.params().sell_probability, 0.0);
        }
    }

    #[test]
    fn test_whale_dominated_uses_large_multiplier() {
        let params = MarketScenario::WhaleDominated.params();
        assert_eq!(params.whale_multiplier, 20.0);
        assert_eq!(params.whale_probability, 0.3);
    }

    #[test]
    fn test_serialized_name_matches() {
        let json = serde_json::to_string(&MarketScenario::BullMarket).unwrap();
        assert_eq!(json, "\"bull_market\"");
    }
}
