//! Bondsim Runner - Monte Carlo Simulation over Bonding Curves
//!
//! Drives random trade streams through a curve and collects the results:
//!
//! - **Params**: shape of the random trade stream
//! - **Engine**: seeded Monte Carlo runs, batches and graduation odds
//! - **Scenario**: preset market regimes for side-by-side comparison
//! - **Config**: JSON configuration with an embedded default
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────┐      ┌──────────────────┐
//!   │ SimulationConfig │─────▶│ SimulationEngine │◀──── StdRng (seed)
//!   └──────────────────┘      └────────┬─────────┘
//!                                      │ one session per run
//!                                      ▼
//!                            ┌───────────────────┐
//!                            │  TradingSession   │──▶ &Curve
//!                            └────────┬──────────┘
//!                                     │ SimulationResult
//!                                     ▼
//!                            ┌───────────────────┐
//!                            │ bondsim-analytics │
//!                            └───────────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod params;
pub mod scenario;

// Re-export main types
pub use config::{ConfigError, CurveConfig, SimulationConfig};
pub use engine::{GraduationProbability, SimulationEngine, TradeOutcome, execute_intent};
pub use error::{Result, SimulationError};
pub use params::TradeParams;
pub use scenario::{MarketScenario, ScenarioSummary};
