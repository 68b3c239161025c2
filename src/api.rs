//! High-level API.
//!
//! Ready-made engines for the two supported geometries and one-call fitting
//! functions built on top of them.

use crate::core::{Ransac, RansacOutput, StagnationTermination};
use crate::error::RansacError;
use crate::estimators::{LineEstimator, PlaneEstimator};
use crate::models::{LineModel, PlaneModel};
use crate::samplers::{PermutationSampler, UniformRandomSampler};
use crate::settings::RansacSettings;
use crate::types::{Point2D, Point3D};

/// Line-fitting engine: 2-point uniform samples, least-squares refinement.
pub type LineRansac<T = StagnationTermination> = Ransac<LineEstimator, UniformRandomSampler, T>;

/// Plane-fitting engine: 3-point permutation-scan samples, eigenvector
/// refinement.
pub type PlaneRansac<T = StagnationTermination> = Ransac<PlaneEstimator, PermutationSampler, T>;

impl LineRansac {
    /// Engine over `points`, seeded from `settings.random_seed`.
    pub fn from_points(points: Vec<Point2D>, settings: RansacSettings) -> Result<Self, RansacError> {
        let sampler = UniformRandomSampler::from_settings(&settings);
        Ransac::new(points, settings, LineEstimator::new(), sampler)
    }
}

impl PlaneRansac {
    /// Engine over `points`, seeded from `settings.random_seed`.
    pub fn from_points(points: Vec<Point3D>, settings: RansacSettings) -> Result<Self, RansacError> {
        let sampler = PermutationSampler::from_settings(&settings);
        Ransac::new(points, settings, PlaneEstimator::new(), sampler)
    }
}

/// Robustly fit a 2D line.
///
/// # Arguments
/// * `points` - Observations, outliers included
/// * `settings` - Optional RANSAC settings (uses defaults if None)
///
/// # Returns
/// The refined line with its inliers, or why no line could be fitted.
pub fn estimate_line(
    points: &[Point2D],
    settings: Option<RansacSettings>,
) -> Result<RansacOutput<LineModel>, RansacError> {
    LineRansac::from_points(points.to_vec(), settings.unwrap_or_default())?.run()
}

/// Robustly fit a 3D plane.
///
/// # Arguments
/// * `points` - Observations, outliers included
/// * `settings` - Optional RANSAC settings (uses defaults if None)
///
/// # Returns
/// The refined plane with its inliers, or why no plane could be fitted.
pub fn estimate_plane(
    points: &[Point3D],
    settings: Option<RansacSettings>,
) -> Result<RansacOutput<PlaneModel>, RansacError> {
    PlaneRansac::from_points(points.to_vec(), settings.unwrap_or_default())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfidenceTermination, Model, StopReason};

    #[test]
    fn seeded_runs_are_reproducible() {
        let points: Vec<Point2D> = (0..30)
            .map(|i| {
                let x = i as f64 * 0.5;
                let y = if i % 4 == 0 { -3.0 * x } else { 0.5 * x - 2.0 };
                Point2D::new(x, y)
            })
            .collect();
        let settings = RansacSettings {
            error_tolerance: 0.1,
            max_iterations: 200,
            min_consensus: 10,
            random_seed: Some(17),
            ..Default::default()
        };

        let a = estimate_line(&points, Some(settings.clone())).unwrap();
        let b = estimate_line(&points, Some(settings)).unwrap();
        assert_eq!(a.model, b.model);
        assert_eq!(a.inliers, b.inliers);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn invalid_settings_are_reported_before_running() {
        let points = vec![Point3D::origin(); 5];
        let settings = RansacSettings {
            min_consensus: 2,
            ..Default::default()
        };
        assert!(matches!(
            estimate_plane(&points, Some(settings)),
            Err(RansacError::InvalidSettings(_))
        ));
    }

    #[test]
    fn confidence_termination_plugs_into_the_engine() {
        let points: Vec<Point3D> = (0..40)
            .map(|i| {
                let (x, y) = ((i % 8) as f64, (i / 8) as f64);
                Point3D::new(x, y, 0.25 * x - 0.5 * y + 3.0)
            })
            .collect();
        let settings = RansacSettings {
            error_tolerance: 0.01,
            max_iterations: 500,
            min_consensus: 3,
            random_seed: Some(4),
            ..Default::default()
        };

        let mut ransac = PlaneRansac::from_points(points, settings)
            .unwrap()
            .with_termination(ConfidenceTermination {
                confidence: 0.99,
                min_consensus: 3,
            });
        let output = ransac.run().unwrap();

        // Every sample is all-inlier, so the bound is met after one iteration.
        assert_eq!(output.stats.stop_reason, StopReason::Converged);
        assert_eq!(output.stats.iterations, 1);
        assert_eq!(output.inlier_count(), 40);
        assert!(output.model.is_valid());
    }
}
