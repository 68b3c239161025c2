//! RANSAC configuration.
//!
//! A plain struct with public fields and defaults; build it with struct
//! update syntax and let the engine validate it on construction.

use crate::error::RansacError;

/// Per-iteration attempt budget of the samplers when none is configured.
pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: usize = 10;

/// Main configuration object for a RANSAC run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RansacSettings {
    /// Points with a residual strictly below this are inliers.
    pub error_tolerance: f64,
    /// Iteration budget, including iterations wasted on degenerate samples.
    pub max_iterations: usize,
    /// Best consensus size required before the run may stop early.
    pub min_consensus: usize,
    /// Fraction of `max_iterations` the best model may go without improving
    /// before an early stop. `0.25` reproduces `max_iterations / 4`.
    pub stagnation_fraction: f64,
    /// Attempts a sampler makes per iteration before giving up on it.
    pub max_sample_attempts: usize,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub random_seed: Option<u64>,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            error_tolerance: 0.5,
            max_iterations: 1000,
            min_consensus: 3,
            stagnation_fraction: 0.25,
            max_sample_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
            random_seed: None,
        }
    }
}

impl RansacSettings {
    /// Iterations without improvement after which the run may stop early.
    pub fn stagnation_limit(&self) -> usize {
        (self.max_iterations as f64 * self.stagnation_fraction).floor() as usize
    }

    /// Check the settings against a model whose minimal sample has
    /// `sample_size` points.
    pub fn validate(&self, sample_size: usize) -> Result<(), RansacError> {
        if !(self.error_tolerance.is_finite() && self.error_tolerance > 0.0) {
            return Err(RansacError::InvalidSettings(format!(
                "error_tolerance must be a positive finite number, got {}",
                self.error_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RansacError::InvalidSettings(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        if self.min_consensus < sample_size {
            return Err(RansacError::InvalidSettings(format!(
                "min_consensus ({}) must be at least the minimal sample size ({})",
                self.min_consensus, sample_size
            )));
        }
        if !(self.stagnation_fraction.is_finite() && self.stagnation_fraction >= 0.0) {
            return Err(RansacError::InvalidSettings(format!(
                "stagnation_fraction must be a non-negative finite number, got {}",
                self.stagnation_fraction
            )));
        }
        if self.max_sample_attempts == 0 {
            return Err(RansacError::InvalidSettings(
                "max_sample_attempts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid_for_lines_and_planes() {
        let cfg = RansacSettings::default();
        assert!((cfg.error_tolerance - 0.5).abs() < 1e-12);
        assert_eq!(cfg.max_iterations, 1000);
        assert_eq!(cfg.max_sample_attempts, DEFAULT_MAX_SAMPLE_ATTEMPTS);
        assert_eq!(cfg.random_seed, None);
        assert!(cfg.validate(2).is_ok());
        assert!(cfg.validate(3).is_ok());
    }

    #[test]
    fn stagnation_limit_is_a_quarter_of_the_budget_by_default() {
        let cfg = RansacSettings {
            max_iterations: 100,
            ..Default::default()
        };
        assert_eq!(cfg.stagnation_limit(), 25);

        let cfg = RansacSettings {
            max_iterations: 10,
            ..Default::default()
        };
        assert_eq!(cfg.stagnation_limit(), 10 / 4);

        let cfg = RansacSettings {
            max_iterations: 10,
            stagnation_fraction: 0.5,
            ..Default::default()
        };
        assert_eq!(cfg.stagnation_limit(), 5);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let bad = [
            RansacSettings {
                error_tolerance: 0.0,
                ..Default::default()
            },
            RansacSettings {
                error_tolerance: f64::NAN,
                ..Default::default()
            },
            RansacSettings {
                max_iterations: 0,
                ..Default::default()
            },
            RansacSettings {
                min_consensus: 2,
                ..Default::default()
            },
            RansacSettings {
                stagnation_fraction: -1.0,
                ..Default::default()
            },
            RansacSettings {
                max_sample_attempts: 0,
                ..Default::default()
            },
        ];

        for cfg in bad {
            assert!(
                matches!(cfg.validate(3), Err(RansacError::InvalidSettings(_))),
                "{cfg:?} should be rejected"
            );
        }
    }
}
