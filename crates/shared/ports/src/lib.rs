//! Bondsim Ports
//!
//! Port definitions (traits) for the bonding curve simulator.
//! These define the boundary between curve mathematics and the trading
//! and simulation layers built on top of it.

mod curve;
mod error;

pub use curve::{
    BISECTION_TOLERANCE, BondingCurve, MAX_BISECTION_STEPS, PRICE_FLOOR, bisect_tokens_out,
};
pub use error::{CurveError, CurveResult, TradeError, TradeResult};
