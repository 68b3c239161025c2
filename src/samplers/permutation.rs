//! Permutation-scan sampler.

use rand::Rng;
use rand::rngs::StdRng;

use crate::core::{Draw, Estimator, PointOf, Sampler};
use crate::settings::{DEFAULT_MAX_SAMPLE_ATTEMPTS, RansacSettings};
use crate::utils::UniformRandomGenerator;

/// Sampler that shuffles the point indices once per draw and scans
/// consecutive windows of the permutation for a non-degenerate sample.
///
/// At most `min(max_attempts, n - sample_size + 1)` windows are inspected, so
/// the cost of one draw is bounded even when most triples are collinear.
#[derive(Debug, Clone)]
pub struct PermutationSampler<R = StdRng> {
    rng: UniformRandomGenerator<R>,
    max_attempts: usize,
    permutation: Vec<usize>,
}

impl Default for PermutationSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl PermutationSampler<StdRng> {
    /// Construct a new sampler with a random seed.
    pub fn new() -> Self {
        Self::with_generator(UniformRandomGenerator::new())
    }

    /// Construct a sampler from a fixed seed (primarily for tests).
    pub fn from_seed(seed: u64) -> Self {
        Self::with_generator(UniformRandomGenerator::from_seed(seed))
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

impl<R: Rng> PermutationSampler<R> {
    /// Sample with an injected random source.
    pub fn with_rng(rng: R) -> Self {
        Self::with_generator(UniformRandomGenerator::from_rng(rng))
    }

    fn with_generator(rng: UniformRandomGenerator<R>) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
            permutation: Vec::new(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Windows inspected per draw for `n` points and samples of
    /// `sample_size`.
    pub fn attempt_budget(&self, n: usize, sample_size: usize) -> usize {
        if sample_size == 0 || n < sample_size {
            return 0;
        }
        self.max_attempts.min(n - sample_size + 1)
    }
}

impl<R: Rng> Sampler for PermutationSampler<R> {
    fn sample<E: Estimator>(
        &mut self,
        estimator: &E,
        points: &[PointOf<E>],
        out_indices: &mut [usize],
    ) -> Draw {
        let n = points.len();
        let sample_size = estimator.sample_size();
        let budget = self.attempt_budget(n, sample_size);
        if budget == 0 || out_indices.len() < sample_size {
            return Draw::Exhausted { attempts: 0 };
        }

        self.rng.permutation(&mut self.permutation, n);
        for start in 0..budget {
            let window = &self.permutation[start..start + sample_size];
            if estimator.is_valid_sample(points, window) {
                out_indices[..sample_size].copy_from_slice(window);
                return Draw::Accepted { attempts: start + 1 };
            }
        }

        Draw::Exhausted { attempts: budget }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::PlaneEstimator;
    use crate::types::Point3D;

    #[test]
    fn attempt_budget_is_capped_by_window_count() {
        let sampler = PermutationSampler::from_seed(0);
        assert_eq!(sampler.attempt_budget(100, 3), 10);
        assert_eq!(sampler.attempt_budget(5, 3), 3);
        assert_eq!(sampler.attempt_budget(3, 3), 1);
        assert_eq!(sampler.attempt_budget(2, 3), 0);
        assert_eq!(sampler.with_max_attempts(4).attempt_budget(100, 3), 4);
    }

    #[test]
    fn accepted_samples_are_non_collinear() {
        let points: Vec<Point3D> = (0..12)
            .map(|i| Point3D::new(i as f64, (i * i) as f64 * 0.5, (i % 3) as f64))
            .collect();
        let estimator = PlaneEstimator::new();
        let mut sampler = PermutationSampler::from_seed(21);
        let mut sample = [0usize; 3];

        for _ in 0..30 {
            let draw = sampler.sample(&estimator, &points, &mut sample);
            assert!(draw.is_accepted());
            assert!(estimator.is_valid_sample(&points, &sample));
        }
    }

    #[test]
    fn collinear_data_exhausts_after_bounded_attempts() {
        let points: Vec<Point3D> = (0..30).map(|i| Point3D::new(i as f64, i as f64, 0.0)).collect();
        let estimator = PlaneEstimator::new();
        let mut sampler = PermutationSampler::from_seed(8);
        let mut sample = [0usize; 3];

        assert_eq!(
            sampler.sample(&estimator, &points, &mut sample),
            Draw::Exhausted { attempts: 10 }
        );

        let mut small = PermutationSampler::from_seed(8);
        assert_eq!(
            small.sample(&estimator, &points[..4], &mut sample),
            Draw::Exhausted { attempts: 2 }
        );
    }

    #[test]
    fn finds_the_only_good_window_when_it_exists() {
        // Three points, not collinear: the single window must be accepted.
        let points = vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
        ];
        let mut sampler = PermutationSampler::from_seed(2);
        let mut sample = [0usize; 3];

        let draw = sampler.sample(&PlaneEstimator::new(), &points, &mut sample);
        assert_eq!(draw, Draw::Accepted { attempts: 1 });
        let mut sorted = sample;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2]);
    }
}
