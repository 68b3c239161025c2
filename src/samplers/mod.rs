//! Sampling strategies for minimal samples.
//!
//! Both samplers own their random stream and reject degenerate samples
//! (as judged by the estimator) within a bounded number of attempts:
//! - [`UniformRandomSampler`]: independent uniform draws without replacement.
//! - [`PermutationSampler`]: consecutive windows of one random permutation.

pub mod permutation;
pub mod uniform;

pub use permutation::PermutationSampler;
pub use uniform::UniformRandomSampler;
