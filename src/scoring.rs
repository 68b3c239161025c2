//! Consensus scoring.
//!
//! A model's consensus set is every point whose residual is strictly below
//! the error tolerance. The score carries the set size, which is what the
//! engine compares, and the residual sum for the mean-residual quality
//! measure reported after a run.

use crate::core::Model;

/// Inlier count and residual sum of one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub inlier_count: usize,
    pub residual_sum: f64,
}

impl Score {
    pub fn new(inlier_count: usize, residual_sum: f64) -> Self {
        Self {
            inlier_count,
            residual_sum,
        }
    }

    pub fn empty() -> Self {
        Self::new(0, 0.0)
    }

    /// Mean inlier residual, or `f64::INFINITY` without inliers.
    pub fn mean_residual(&self) -> f64 {
        if self.inlier_count == 0 {
            return f64::INFINITY;
        }
        self.residual_sum / self.inlier_count as f64
    }
}

/// Scoring strategy used to evaluate model quality and determine inliers.
pub trait Scoring<M: Model> {
    /// Score `model` against `points`, writing its inlier indices (ascending)
    /// into `inliers_out`.
    fn score(&self, points: &[M::Point], model: &M, inliers_out: &mut Vec<usize>) -> Score;
}

/// RANSAC-style hard-threshold inlier counting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlierCountScoring {
    threshold: f64,
}

impl InlierCountScoring {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Indices of the points `model` explains.
    pub fn consensus_set<M: Model>(&self, points: &[M::Point], model: &M) -> Vec<usize> {
        let mut inliers = Vec::new();
        self.score(points, model, &mut inliers);
        inliers
    }

    /// Mean inlier residual of `model`.
    pub fn evaluate<M: Model>(&self, points: &[M::Point], model: &M) -> f64 {
        let mut inliers = Vec::new();
        self.score(points, model, &mut inliers).mean_residual()
    }
}

impl<M: Model> Scoring<M> for InlierCountScoring {
    fn score(&self, points: &[M::Point], model: &M, inliers_out: &mut Vec<usize>) -> Score {
        inliers_out.clear();
        if !model.is_valid() {
            return Score::empty();
        }

        let mut residual_sum = 0.0;
        for (i, point) in points.iter().enumerate() {
            let r = model.residual(point);
            if r < self.threshold {
                inliers_out.push(i);
                residual_sum += r;
            }
        }

        Score::new(inliers_out.len(), residual_sum)
    }
}
