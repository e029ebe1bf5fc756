//! Simulation Engine - Monte Carlo trading over a bonding curve
//!
//! Each run opens a fresh [`TradingSession`] on the shared curve and feeds it
//! a stream of random trade intents:
//! - Side: sell with `sell_probability` once tokens are outstanding, else buy
//! - Size: `|Normal(avg, std)|`, scaled by `whale_multiplier` for whale intents
//! - Tax: withheld from every buy intent before it reaches the curve, and
//!   from the proceeds of executed sells
//!
//! Rejected intents never abort a run; they are recorded as [`SkippedTrade`]s.

use bondsim_analytics::stats::mean;
use bondsim_core::{
    BondingCurve, Curve, Side, SimulationResult, SkipReason, SkippedTrade, Trade,
    TradingSession,
};
use log::{debug, info};
use rand::prelude::*;
use rand_distr::Normal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Result, SimulationError};
use crate::params::TradeParams;
use crate::scenario::{MarketScenario, ScenarioSummary};

/// Generated trade sizes are floored here (currency units)
pub const MIN_TRADE_SIZE: f64 = 0.1;

/// A single sell never burns more than this fraction of the tokens sold
pub const MAX_SELL_FRACTION: f64 = 0.1;

/// What happened to one trade intent
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Executed {
        trade: Trade,
        /// Tax withheld from this trade
        tax: f64,
        /// Gross currency moved (before tax)
        volume: f64,
    },
    Skipped {
        skip: SkippedTrade,
        /// Tax withheld before the curve refused the trade (buys only)
        tax: f64,
    },
}

/// Graduation odds over a batch of runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GraduationProbability {
    pub graduation_rate: f64,
    pub graduated_count: usize,
    /// Zero when no run graduated
    pub avg_trades_to_graduation: f64,
    /// Over all runs
    pub avg_final_price: f64,
    /// Over all runs
    pub avg_volume: f64,
}

/// Random trade size generator for one set of parameters
struct IntentGenerator {
    sell_probability: f64,
    whale_probability: f64,
    normal: Normal<f64>,
    whale: Normal<f64>,
}

impl IntentGenerator {
    fn new(params: &TradeParams) -> Result<Self> {
        let normal = Normal::new(params.avg_trade_size, params.trade_size_std)
            .map_err(|e| SimulationError::InvalidParams(format!("trade size: {e}")))?;
        let whale = Normal::new(
            params.avg_trade_size * params.whale_multiplier,
            params.trade_size_std * params.whale_multiplier,
        )
        .map_err(|e| SimulationError::InvalidParams(format!("whale trade size: {e}")))?;

        Ok(Self {
            sell_probability: params.sell_probability,
            whale_probability: params.whale_probability,
            normal,
            whale,
        })
    }

    /// Draw side, then whale flag, then size
    fn next<R: Rng + ?Sized>(&self, rng: &mut R, can_sell: bool) -> (Side, f64) {
        let is_sell = rng.r#gen::<f64>() < self.sell_probability && can_sell;
        let is_whale = rng.r#gen::<f64>() < self.whale_probability;

        let size = if is_whale {
            self.whale.sample(rng)
        } else {
            self.normal.sample(rng)
        };

        let side = if is_sell { Side::Sell } else { Side::Buy };
        (side, size.abs().max(MIN_TRADE_SIZE))
    }
}

/// Execute one intent of `size` currency units against `session`
///
/// Sells are converted to tokens at the current quote and capped at
/// [`MAX_SELL_FRACTION`] of the tokens sold. Curve state is untouched when
/// the outcome is [`TradeOutcome::Skipped`]; a skipped buy still reports the
/// tax withheld from it.
pub fn execute_intent(
    session: &mut TradingSession<'_>,
    side: Side,
    size: f64,
    tax_rate: f64,
    index: usize,
) -> TradeOutcome {
    let skipped = |reason: SkipReason, tax: f64| TradeOutcome::Skipped {
        skip: SkippedTrade {
            index,
            side,
            reason,
        },
        tax,
    };
    let expected_price = session.current_price();

    match side {
        Side::Buy => {
            let tax = size * tax_rate;
            match session.buy(size - tax) {
                Ok(fill) => TradeOutcome::Executed {
                    trade: Trade {
                        side,
                        currency_amount: size,
                        token_amount: fill.tokens,
                        price: fill.price,
                        slippage: side.slippage(expected_price, fill.price),
                        total_supply: session.tokens_sold(),
                        currency_raised: session.currency_raised(),
                        index,
                    },
                    tax,
                    volume: size,
                },
                Err(e) => skipped(SkipReason::Rejected(e), tax),
            }
        }
        Side::Sell => {
            if expected_price <= 0.0 {
                return skipped(SkipReason::EmptySell, 0.0);
            }
            let tokens = (size / expected_price).min(session.tokens_sold() * MAX_SELL_FRACTION);
            if tokens <= 0.0 {
                return skipped(SkipReason::EmptySell, 0.0);
            }

            match session.sell(tokens) {
                Ok(fill) => {
                    let tax = fill.currency * tax_rate;
                    TradeOutcome::Executed {
                        trade: Trade {
                            side,
                            currency_amount: fill.currency - tax,
                            token_amount: fill.tokens,
                            price: fill.price,
                            slippage: side.slippage(expected_price, fill.price),
                            total_supply: session.tokens_sold(),
                            currency_raised: session.currency_raised(),
                            index,
                        },
                        tax,
                        volume: fill.currency,
                    }
                }
                Err(e) => skipped(SkipReason::Rejected(e), 0.0),
            }
        }
    }
}

/// Run one simulation against `curve` drawing from `rng`
fn simulate<R: Rng + ?Sized>(
    curve: &Curve,
    tax_rate: f64,
    params: &TradeParams,
    rng: &mut R,
) -> Result<SimulationResult> {
    params.validate()?;
    let generator = IntentGenerator::new(params)?;
    let mut session = TradingSession::new(curve);

    let mut trades = Vec::new();
    let mut skipped = Vec::new();
    let mut total_volume = 0.0;
    let mut tax_collected = 0.0;

    for index in 0..params.num_trades {
        if session.is_graduated() {
            break;
        }

        let (side, size) = generator.next(rng, session.tokens_sold() > 0.0);
        match execute_intent(&mut session, side, size, tax_rate, index) {
            TradeOutcome::Executed { trade, tax, volume } => {
                tax_collected += tax;
                total_volume += volume;
                trades.push(trade);
            }
            TradeOutcome::Skipped { skip, tax } => {
                tax_collected += tax;
                debug!(
                    "Skipped {:?} intent #{} of {:.4}: {:?}",
                    skip.side, skip.index, size, skip.reason
                );
                skipped.push(skip);
            }
        }
    }

    Ok(SimulationResult {
        trades,
        graduated: session.is_graduated(),
        final_price: session.current_price(),
        final_tokens_sold: session.tokens_sold(),
        final_currency_raised: session.currency_raised(),
        total_volume,
        tax_collected,
        skipped,
    })
}

/// Monte Carlo engine over one curve
///
/// The curve is never mutated; every run trades in its own session.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    curve: Curve,
    tax_rate: f64,
    rng: StdRng,
}

impl SimulationEngine {
    /// Create an engine with an entropy-seeded RNG
    pub fn new(curve: Curve, tax_rate: f64) -> Result<Self> {
        Self::build(curve, tax_rate, None)
    }

    /// Create an engine whose runs are reproducible
    pub fn with_seed(curve: Curve, tax_rate: f64, seed: u64) -> Result<Self> {
        Self::build(curve, tax_rate, Some(seed))
    }

    pub(crate) fn build(curve: Curve, tax_rate: f64, seed: Option<u64>) -> Result<Self> {
        if !(0.0..1.0).contains(&tax_rate) {
            return Err(SimulationError::InvalidTaxRate(tax_rate));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            curve,
            tax_rate,
            rng,
        })
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Run one simulation on the engine's RNG
    pub fn run_simulation(&mut self, params: &TradeParams) -> Result<SimulationResult> {
        simulate(&self.curve, self.tax_rate, params, &mut self.rng)
    }

    /// Run one simulation on an explicit random source
    pub fn run_simulation_with_rng<R: Rng + ?Sized>(
        &self,
        params: &TradeParams,
        rng: &mut R,
    ) -> Result<SimulationResult> {
        simulate(&self.curve, self.tax_rate, params, rng)
    }

    /// Run `num_simulations` independent simulations in sequence
    pub fn run_batch_simulations(
        &mut self,
        num_simulations: usize,
        params: &TradeParams,
    ) -> Result<Vec<SimulationResult>> {
        info!(
            "Running {} simulations of up to {} trades on {} curve",
            num_simulations,
            params.num_trades,
            self.curve.name()
        );

        let results = (0..num_simulations)
            .map(|_| self.run_simulation(params))
            .collect::<Result<Vec<_>>>()?;

        let graduated = results.iter().filter(|r| r.graduated).count();
        info!(
            "Batch complete: {}/{} runs graduated",
            graduated, num_simulations
        );
        Ok(results)
    }

    /// Estimate how likely `params` is to graduate the curve
    pub fn analyze_graduation_probability(
        &mut self,
        num_simulations: usize,
        params: &TradeParams,
    ) -> Result<GraduationProbability> {
        if num_simulations == 0 {
            return Err(SimulationError::InvalidParams(
                "num_simulations must be positive".to_string(),
            ));
        }
        let results = self.run_batch_simulations(num_simulations, params)?;

        let graduated_trades: Vec<f64> = results
            .iter()
            .filter(|r| r.graduated)
            .map(|r| r.trades.len() as f64)
            .collect();
        let final_prices: Vec<f64> = results.iter().map(|r| r.final_price).collect();
        let volumes: Vec<f64> = results.iter().map(|r| r.total_volume).collect();

        Ok(GraduationProbability {
            graduation_rate: graduated_trades.len() as f64 / num_simulations as f64,
            graduated_count: graduated_trades.len(),
            avg_trades_to_graduation: mean(&graduated_trades),
            avg_final_price: mean(&final_prices),
            avg_volume: mean(&volumes),
        })
    }

    /// One run per [`MarketScenario`], keyed by scenario
    pub fn simulate_market_scenarios(
        &mut self,
    ) -> Result<BTreeMap<MarketScenario, ScenarioSummary>> {
        let mut summaries = BTreeMap::new();

        for scenario in MarketScenario::all() {
            let result = self.run_simulation(&scenario.params())?;
            let sizes: Vec<f64> = result.trades.iter().map(|t| t.currency_amount).collect();
            let max_slippage = result
                .trades
                .iter()
                .map(|t| t.slippage)
                .reduce(f64::max)
                .unwrap_or(0.0);

            debug!(
                "Scenario {}: {} trades, graduated={}",
                scenario.name(),
                result.num_trades(),
                result.graduated
            );

            summaries.insert(
                scenario,
                ScenarioSummary {
                    graduated: result.graduated,
                    final_price: result.final_price,
                    total_volume: result.total_volume,
                    num_trades: result.num_trades(),
                    avg_trade_size: mean(&sizes),
                    max_slippage,
                },
            );
        }

        Ok(summaries)
    }
}
