//! Bondsim Analytics
//!
//! Read-only statistics over [`SimulationResult`]s:
//!
//! - **metrics**: per-run market quality metrics and their cross-run aggregates
//! - **distribution**: shape of the trade size distribution
//! - **graduation**: how often and how quickly runs graduate
//!
//! Every function returns zeros rather than `NaN` on empty input.

pub mod distribution;
pub mod graduation;
pub mod metrics;
pub mod stats;

pub use distribution::{TradeDistribution, analyze_trade_distribution};
pub use graduation::{GraduationMetrics, calculate_graduation_metrics};
pub use metrics::{
    METRIC_NAMES, TradeMetrics, calculate_aggregate_metrics, calculate_metrics,
};
pub use stats::SummaryStats;

#[doc(no_inline)]
pub use bondsim_core::SimulationResult;
