//! Random index generation shared by the samplers.
//!
//! The generator owns its RNG so every sampler (and therefore every engine)
//! carries an independent, reproducible random stream. Nothing here touches
//! process-wide random state.

use rand::distributions::Uniform;
use rand::prelude::*;

/// Uniform random generator over index ranges.
///
/// By default this uses an entropy-seeded [`StdRng`], but test code can
/// construct it from a fixed seed or inject any other [`Rng`].
#[derive(Debug, Clone)]
pub struct UniformRandomGenerator<R = StdRng> {
    rng: R,
}

impl Default for UniformRandomGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandomGenerator<StdRng> {
    /// Construct with a random seed (suitable for production use).
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Construct with a fixed seed (useful for tests).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> UniformRandomGenerator<R> {
    /// Wrap an existing random source.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Fill `out` with distinct indices drawn uniformly from `[min, max]`.
    ///
    /// Returns `false` and leaves `out` untouched when the range holds fewer
    /// values than requested.
    pub fn gen_unique(&mut self, out: &mut [usize], min: usize, max: usize) -> bool {
        if max < min || max - min + 1 < out.len() {
            return false;
        }

        let dist = Uniform::new_inclusive(min, max);
        for i in 0..out.len() {
            loop {
                let candidate = self.rng.sample(&dist);
                if out[..i].iter().all(|&v| v != candidate) {
                    out[i] = candidate;
                    break;
                }
            }
        }
        true
    }

    /// Overwrite `out` with a uniformly random permutation of `0..out.len()`.
    pub fn permutation(&mut self, out: &mut Vec<usize>, n: usize) {
        out.clear();
        out.extend(0..n);
        out.shuffle(&mut self.rng);
    }
}
