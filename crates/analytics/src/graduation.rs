//! Graduation statistics across a batch of runs

use bondsim_core::SimulationResult;
use serde::{Deserialize, Serialize};

use crate::stats::mean;

/// How often and at what cost runs reached graduation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraduationMetrics {
    /// Fraction of runs that graduated
    pub graduation_rate: f64,
    pub avg_trades_to_graduation: f64,
    pub avg_volume_to_graduation: f64,
    pub avg_final_price_graduated: f64,
    /// Mean of final price / first executed price over graduated runs
    pub price_multiplier_at_graduation: f64,
}

impl GraduationMetrics {
    /// Generate summary report
    pub fn summary(&self) -> String {
        format!(
            "Graduation Rate: {:.1}%\n\
             Avg Trades to Graduation: {:.1}\n\
             Avg Volume to Graduation: {:.2}\n\
             Avg Final Price: {:.6}\n\
             Price Multiplier: {:.2}x",
            self.graduation_rate * 100.0,
            self.avg_trades_to_graduation,
            self.avg_volume_to_graduation,
            self.avg_final_price_graduated,
            self.price_multiplier_at_graduation,
        )
    }
}

/// Calculate graduation statistics; all zeros when no run graduated
pub fn calculate_graduation_metrics(results: &[SimulationResult]) -> GraduationMetrics {
    let graduated: Vec<&SimulationResult> = results.iter().filter(|r| r.graduated).collect();
    if graduated.is_empty() {
        return GraduationMetrics::default();
    }

    let trades: Vec<f64> = graduated.iter().map(|r| r.trades.len() as f64).collect();
    let volumes: Vec<f64> = graduated.iter().map(|r| r.total_volume).collect();
    let final_prices: Vec<f64> = graduated.iter().map(|r| r.final_price).collect();

    let multipliers: Vec<f64> = graduated
        .iter()
        .filter_map(|r| {
            let initial = r.first_trade()?.price;
            (initial > 0.0).then(|| r.final_price / initial)
        })
        .collect();

    GraduationMetrics {
        graduation_rate: graduated.len() as f64 / results.len() as f64,
        avg_trades_to_graduation: mean(&trades),
        avg_volume_to_graduation: mean(&volumes),
        avg_final_price_graduated: mean(&final_prices),
        price_multiplier_at_graduation: mean(&multipliers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondsim_core::{Side, Trade};

    fn run(graduated: bool, first_price: f64, final_price: f64, n: usize) -> SimulationResult {
        let trades = (0..n)
            .map(|i| Trade {
                side: Side::Buy,
                currency_amount: 10.0,
                token_amount: 1.0,
                price: first_price,
                slippage: 0.0,
                total_supply: 0.0,
                currency_raised: 10.0 * (i + 1) as f64,
                index: i,
            })
            .collect();
        SimulationResult {
            trades,
            graduated,
            final_price,
            final_tokens_sold: 0.0,
            final_currency_raised: 10.0 * n as f64,
            total_volume: 10.0 * n as f64,
            tax_collected: 0.0,
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_no_graduations() {
        let results = vec![run(false, 1.0, 2.0, 3)];
        assert_eq!(
            calculate_graduation_metrics(&results),
            GraduationMetrics::default()
        );
        assert_eq!(
            calculate_graduation_metrics(&[]),
            GraduationMetrics::default()
        );
    }

    #[test]
    fn test_mixed_batch() {
        let results = vec![
            run(true, 1.0, 4.0, 2),
            run(true, 2.0, 4.0, 4),
            run(false, 1.0, 1.5, 10),
            run(false, 1.0, 1.5, 10),
        ];
        let m = calculate_graduation_metrics(&results);

        assert_relative_eq!(m.graduation_rate, 0.5);
        assert_relative_eq!(m.avg_trades_to_graduation, 3.0);
        assert_relative_eq!(m.avg_volume_to_graduation, 30.0);
        assert_relative_eq!(m.avg_final_price_graduated, 4.0);
        // (4/1 + 4/2) / 2
        assert_relative_eq!(m.price_multiplier_at_graduation, 3.0);
    }

    #[test]
    fn test_graduated_without_trades_has_no_multiplier() {
        let results = vec![run(true, 1.0, 4.0, 0)];
        let m = calculate_graduation_metrics(&results);
        assert_eq!(m.graduation_rate, 1.0);
        assert_eq!(m.price_multiplier_at_graduation, 0.0);
    }
}
