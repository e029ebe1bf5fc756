//! Configuration loading
//!
//! JSON files describe the curve, the tax rate, the RNG seed and the trade
//! stream. Every field has a default, so a partial file only overrides what
//! it names.

use bondsim_core::{Curve, CurveShape};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::SimulationEngine;
use crate::error::SimulationError;
use crate::params::TradeParams;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] SimulationError),
}

/// Curve section of the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub total_supply: f64,
    pub graduation_threshold: f64,
    pub shape: CurveShape,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            total_supply: 1e9,
            graduation_threshold: 10_000.0,
            shape: CurveShape::default(),
        }
    }
}

impl CurveConfig {
    pub fn build(&self) -> Result<Curve, SimulationError> {
        Ok(Curve::new(
            self.total_supply,
            self.graduation_threshold,
            self.shape.clone(),
        )?)
    }
}

/// Root configuration for a simulation batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub curve: CurveConfig,
    /// Fraction of each trade withheld as tax, in [0, 1)
    pub tax_rate: f64,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub trades: TradeParams,
    pub num_simulations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            curve: CurveConfig::default(),
            tax_rate: 0.0,
            seed: None,
            trades: TradeParams::default(),
            num_simulations: 100,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the default embedded configuration
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_json(include_str!("default_config.json"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.curve.build()?;
        self.trades.validate()?;
        if !(0.0..1.0).contains(&self.tax_rate) {
            return Err(SimulationError::InvalidTaxRate(self.tax_rate));
        }
        if self.num_simulations == 0 {
            return Err(SimulationError::InvalidParams(
                "num_simulations must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the engine this configuration describes
    pub fn build_engine(&self) -> Result<SimulationEngine, SimulationError> {
        SimulationEngine::build(self.curve.build()?, self.tax_rate, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondsim_core::BondingCurve;

    #[test]
    fn test_load_default_config() {
        let config = SimulationConfig::load_default().unwrap();
        assert_eq!(config.num_simulations, 100);
        assert_eq!(config.tax_rate, 0.01);
        assert_eq!(config.seed, None);
        assert_eq!(config.curve, CurveConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = SimulationConfig::from_json(
            r#"{
                "seed": 7,
                "curve": {"shape": {"type": "exponential", "a": 0.1, "b": 0.001}},
                "trades": {"num_trades": 10}
            }"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.curve.total_supply, 1e9);
        assert_eq!(config.trades.num_trades, 10);
        assert_eq!(config.trades.avg_trade_size, 50.0);

        let engine = config.build_engine().unwrap();
        assert_eq!(engine.curve().name(), "Exponential");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_tax = SimulationConfig::from_json(r#"{"tax_rate": 1.5}"#);
        assert!(matches!(
            bad_tax,
            Err(ConfigError::Invalid(SimulationError::InvalidTaxRate(_)))
        ));

        let bad_curve =
            SimulationConfig::from_json(r#"{"curve": {"shape": {"type": "logarithmic", "b": 0.5}}}"#);
        assert!(matches!(
            bad_curve,
            Err(ConfigError::Invalid(SimulationError::Curve(_)))
        ));

        let no_runs = SimulationConfig::from_json(r#"{"num_simulations": 0}"#);
        assert!(matches!(no_runs, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimulationConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_file("/nonexistent/bondsim.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/bondsim.json"));
    }
}
