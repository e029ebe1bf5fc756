use serde::Serialize;
use thiserror::Error;

/// Precondition violations raised while constructing curves
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CurveError {
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl CurveError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        CurveError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type CurveResult<T> = std::result::Result<T, CurveError>;

/// Errors raised by buy/sell operations against a trading session
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum TradeError {
    #[error("Curve has graduated")]
    Graduated,

    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: f64, reason: &'static str },

    #[error("Total supply exhausted")]
    SupplyExhausted,

    #[error("No tokens issued for {amount}")]
    NoOutput { amount: f64 },
}

pub type TradeResult<T> = std::result::Result<T, TradeError>;
