//! Uniform random sampler drawing minimal samples without replacement.

use rand::Rng;
use rand::rngs::StdRng;

use crate::core::{Draw, Estimator, PointOf, Sampler};
use crate::settings::{DEFAULT_MAX_SAMPLE_ATTEMPTS, RansacSettings};
use crate::utils::UniformRandomGenerator;

/// Uniform random sampler drawing minimal samples without replacement.
///
/// Each attempt draws a fresh set of distinct indices; degenerate samples are
/// redrawn until the attempt budget runs out.
#[derive(Debug, Clone)]
pub struct UniformRandomSampler<R = StdRng> {
    rng: UniformRandomGenerator<R>,
    max_attempts: usize,
}

impl Default for UniformRandomSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandomSampler<StdRng> {
    /// Construct a new sampler with a random seed.
    pub fn new() -> Self {
        Self {
            rng: UniformRandomGenerator::new(),
            max_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }

    /// Construct a sampler from a fixed seed (primarily for tests).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: UniformRandomGenerator::from_seed(seed),
            max_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }

    /// Seed and attempt budget taken from `settings`.
    pub fn from_settings(settings: &RansacSettings) -> Self {
        let sampler = match settings.random_seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::new(),
        };
        sampler.with_max_attempts(settings.max_sample_attempts)
    }
}

impl<R: Rng> UniformRandomSampler<R> {
    /// Sample with an injected random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: UniformRandomGenerator::from_rng(rng),
            max_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl<R: Rng> Sampler for UniformRandomSampler<R> {
    fn sample<E: Estimator>(
        &mut self,
        estimator: &E,
        points: &[PointOf<E>],
        out_indices: &mut [usize],
    ) -> Draw {
        let n = points.len();
        let sample_size = estimator.sample_size();
        if sample_size == 0 || n < sample_size || out_indices.len() < sample_size {
            return Draw::Exhausted { attempts: 0 };
        }

        let sample = &mut out_indices[..sample_size];
        for attempt in 1..=self.max_attempts {
            // Sample unique indices in the range [0, n-1].
            self.rng.gen_unique(sample, 0, n - 1);
            if estimator.is_valid_sample(points, sample) {
                return Draw::Accepted { attempts: attempt };
            }
        }

        Draw::Exhausted {
            attempts: self.max_attempts,
        }
    }
}
