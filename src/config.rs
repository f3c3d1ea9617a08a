//! Engine configuration.
//!
//! Configuration arrives as plain in-process structs; there is no file or
//! environment loading in the core. Every section validates itself before
//! use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::topsis::NormalizationMode;

/// Conventional acceptance threshold for the AHP consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Errors that occur during configuration validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("consistency threshold must be a positive finite number, got {0}")]
    InvalidConsistencyThreshold(f64),

    #[error("perturbation range [{min}, {max}] is invalid")]
    InvalidPerturbationRange { min: f64, max: f64 },

    #[error("perturbation sweep needs at least 2 steps, got {0}")]
    TooFewSteps(usize),
}

/// Weight perturbation sweep settings for sensitivity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Lower bound of the relative perturbation, e.g. -0.5 for -50%.
    #[serde(default = "default_min_delta")]
    pub min_delta: f64,

    /// Upper bound of the relative perturbation, e.g. 0.5 for +50%.
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,

    /// Number of evenly spaced perturbation steps across the range.
    #[serde(default = "default_step_count")]
    pub step_count: usize,

    /// Largest rank movement (in positions) still classified as robust.
    #[serde(default = "default_rank_tolerance")]
    pub rank_tolerance: u32,
}

impl SweepConfig {
    /// Validate sweep configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_delta.is_finite()
            || !self.max_delta.is_finite()
            || self.min_delta >= self.max_delta
        {
            return Err(ConfigError::InvalidPerturbationRange {
                min: self.min_delta,
                max: self.max_delta,
            });
        }
        if self.step_count < 2 {
            return Err(ConfigError::TooFewSteps(self.step_count));
        }
        Ok(())
    }

    /// Returns the evenly spaced perturbation deltas across the range.
    pub fn deltas(&self) -> Vec<f64> {
        let span = self.max_delta - self.min_delta;
        (0..self.step_count)
            .map(|i| self.min_delta + span * i as f64 / (self.step_count - 1) as f64)
            .collect()
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_delta: default_min_delta(),
            max_delta: default_max_delta(),
            step_count: default_step_count(),
            rank_tolerance: default_rank_tolerance(),
        }
    }
}

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Normalization mode applied inside the TOPSIS stage.
    #[serde(default)]
    pub normalization: NormalizationMode,

    /// Acceptance threshold for AHP consistency ratios.
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Sensitivity sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AnalysisConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.consistency_threshold.is_finite() || self.consistency_threshold <= 0.0 {
            return Err(ConfigError::InvalidConsistencyThreshold(
                self.consistency_threshold,
            ));
        }
        self.sweep.validate()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationMode::default(),
            consistency_threshold: default_consistency_threshold(),
            sweep: SweepConfig::default(),
        }
    }
}

fn default_min_delta() -> f64 {
    -0.5
}

fn default_max_delta() -> f64 {
    0.5
}

fn default_step_count() -> usize {
    11
}

fn default_rank_tolerance() -> u32 {
    1
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.normalization, NormalizationMode::MinMax);
        assert_eq!(config.consistency_threshold, DEFAULT_CONSISTENCY_THRESHOLD);
        assert_eq!(config.sweep.step_count, 11);
    }

    #[test]
    fn default_deltas_span_the_range_symmetrically() {
        let deltas = SweepConfig::default().deltas();
        assert_eq!(deltas.len(), 11);
        assert_eq!(deltas[0], -0.5);
        assert_eq!(deltas[10], 0.5);
        assert!(deltas[5].abs() < 1e-12);
    }

    #[test]
    fn sweep_rejects_inverted_range() {
        let sweep = SweepConfig {
            min_delta: 0.5,
            max_delta: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            sweep.validate(),
            Err(ConfigError::InvalidPerturbationRange { .. })
        ));
    }

    #[test]
    fn sweep_rejects_non_finite_bounds() {
        let sweep = SweepConfig {
            max_delta: f64::INFINITY,
            ..Default::default()
        };
        assert!(sweep.validate().is_err());
    }

    #[test]
    fn sweep_rejects_single_step() {
        let sweep = SweepConfig {
            step_count: 1,
            ..Default::default()
        };
        assert_eq!(sweep.validate(), Err(ConfigError::TooFewSteps(1)));
    }

    #[test]
    fn config_rejects_non_positive_threshold() {
        let config = AnalysisConfig {
            consistency_threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConsistencyThreshold(_))
        ));
    }

    #[test]
    fn config_deserializes_from_partial_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"normalization": "vector"}"#).unwrap();
        assert_eq!(config.normalization, NormalizationMode::Vector);
        assert_eq!(config.sweep.step_count, 11);
        assert_eq!(config.consistency_threshold, DEFAULT_CONSISTENCY_THRESHOLD);
    }
}
