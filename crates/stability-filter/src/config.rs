//! Plausibility thresholds

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds on the change between consecutive accepted readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityConfig {
    /// Largest upward change accepted between consecutive readings
    pub max_upward_change: f64,
    /// Largest downward change accepted, unless the reset exception applies
    pub max_downward_change: f64,
    /// Previous values at or above this accept any drop (meter reset)
    pub reset_threshold: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            max_upward_change: 500.0,
            max_downward_change: 100.0,
            reset_threshold: 10_000.0,
        }
    }
}

/// Contradictions in a [`StabilityConfig`], reported at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{bound} must be a positive finite number, got {value}")]
    NonPositiveBound { bound: &'static str, value: f64 },

    #[error("reset_threshold must be a finite number, got {value}")]
    NonFiniteThreshold { value: f64 },
}

impl StabilityConfig {
    /// Check the thresholds for contradictions. Called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_upward_change", self.max_upward_change)?;
        positive("max_downward_change", self.max_downward_change)?;
        if !self.reset_threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold {
                value: self.reset_threshold,
            });
        }
        Ok(())
    }
}

fn positive(bound: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveBound { bound, value })
    }
}
