//! Brake controller configuration.

use serde::{Deserialize, Serialize};

use crate::brake::PRESSURE_RANGE;
use crate::error::{FuzzyError, FuzzyResult};
use crate::variable::MAX_SAMPLES;

/// What the controller reports when no rule fires for the current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Midpoint of the pressure universe (50%)
    #[default]
    Midpoint,
    /// Zero pressure
    NoBraking,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrakeConfig {
    /// Spacing of the sample grid over the pressure universe. Centroids depend
    /// on it, so it is part of the configuration rather than hard-coded.
    pub sample_step: f64,
    /// No inference runs while `distance >= speed * stopping_distance_ratio`.
    pub stopping_distance_ratio: f64,
    pub fallback: FallbackPolicy,
}

impl Default for BrakeConfig {
    fn default() -> Self {
        Self {
            sample_step: 1.0,
            stopping_distance_ratio: 0.5,
            fallback: FallbackPolicy::Midpoint,
        }
    }
}

impl BrakeConfig {
    pub fn validate(&self) -> FuzzyResult<()> {
        if !self.sample_step.is_finite() || self.sample_step <= 0. {
            return Err(FuzzyError::InvalidConfig(format!(
                "sample_step must be positive, got {}",
                self.sample_step
            )));
        }
        let width = PRESSURE_RANGE.end() - PRESSURE_RANGE.start();
        if width / self.sample_step >= MAX_SAMPLES as f64 {
            return Err(FuzzyError::InvalidConfig(format!(
                "sample_step {} gives more than {MAX_SAMPLES} pressure samples",
                self.sample_step
            )));
        }
        if !self.stopping_distance_ratio.is_finite() || self.stopping_distance_ratio < 0. {
            return Err(FuzzyError::InvalidConfig(format!(
                "stopping_distance_ratio must be non-negative, got {}",
                self.stopping_distance_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BrakeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fallback, FallbackPolicy::Midpoint);
    }

    #[test]
    fn test_invalid_config() {
        let config = BrakeConfig {
            sample_step: 0.,
            ..BrakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(FuzzyError::InvalidConfig(_))));

        let config = BrakeConfig {
            sample_step: 1e-12,
            ..BrakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(FuzzyError::InvalidConfig(_))));

        let config = BrakeConfig {
            sample_step: 0.01,
            ..BrakeConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = BrakeConfig {
            stopping_distance_ratio: f64::NAN,
            ..BrakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(FuzzyError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config: BrakeConfig = serde_json::from_str(r#"{"fallback": "no_braking"}"#).unwrap();

        assert_eq!(config.fallback, FallbackPolicy::NoBraking);
        assert_eq!(config.sample_step, 1.0);
        assert_eq!(config.stopping_distance_ratio, 0.5);

        let json = serde_json::to_string(&BrakeConfig::default()).unwrap();
        assert!(json.contains("\"midpoint\""));
    }
}
