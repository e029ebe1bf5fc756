//! Runner errors

use bondsim_core::CurveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid trade parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid tax rate {0}: must be in [0, 1)")]
    InvalidTaxRate(f64),

    #[error("Invalid curve: {0}")]
    Curve(#[from] CurveError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
