//! Bondsim Core Domain
//!
//! Pure domain types for the bonding curve simulator.
//! This crate contains no randomness and no I/O, and is 100% unit testable.
//!
//! - **curves**: the four price functions and the [`CurveShape`] union
//! - **curve**: [`Curve`], a validated shape with supply cap and graduation threshold
//! - **trading**: [`TradingSession`], buy/sell bookkeeping over a borrowed curve
//! - **entities**: trade records and simulation results
//! - **reserve**: reserve-ratio (Bancor) formulas

pub mod curve;
pub mod curves;
pub mod entities;
pub mod reserve;
pub mod trading;

// Re-export commonly used types at crate root
pub use curve::Curve;
pub use curves::{CurveShape, ExponentialCurve, LinearCurve, LogarithmicCurve, PolynomialCurve};
pub use entities::{Side, SimulationResult, SkipReason, SkippedTrade, Trade};
pub use trading::{Fill, TradingSession};

pub use bondsim_ports::{BondingCurve, CurveError, CurveResult, TradeError, TradeResult};
