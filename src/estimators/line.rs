//! Line estimator for 2D line fitting.

use crate::core::Estimator;
use crate::models::LineModel;
use crate::types::{EPSILON, Point2D};

/// Line estimator for 2D line fitting.
///
/// Minimal fits go through [`LineModel::fit_minimal`]. Refinement is
/// ordinary least squares on `y`, which minimizes the same vertical residual
/// the consensus test uses. Near-vertical sets, whose scatter around their
/// mean `x` is smaller than the scatter around the regression line, refine
/// to [`LineModel::Vertical`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEstimator;

impl LineEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl Estimator for LineEstimator {
    type Model = LineModel;

    fn sample_size(&self) -> usize {
        2 // A line requires 2 points
    }

    fn is_valid_sample(&self, points: &[Point2D], sample: &[usize]) -> bool {
        match *sample {
            [i, j] => match (points.get(i), points.get(j)) {
                (Some(p1), Some(p2)) => i != j && p1 != p2,
                _ => false,
            },
            _ => false,
        }
    }

    fn estimate_model(&self, points: &[Point2D], sample: &[usize]) -> LineModel {
        match *sample {
            [i, j] => match (points.get(i), points.get(j)) {
                (Some(p1), Some(p2)) => LineModel::fit_minimal(p1, p2),
                _ => LineModel::Invalid,
            },
            _ => self.estimate_model_nonminimal(points, sample),
        }
    }

    fn estimate_model_nonminimal(&self, points: &[Point2D], subset: &[usize]) -> LineModel {
        let selected = || subset.iter().filter_map(|&idx| points.get(idx));

        let n = selected().count();
        if n < self.sample_size() {
            return LineModel::Invalid;
        }
        let n_f = n as f64;

        let (sum_x, sum_y) = selected().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let mean_x = sum_x / n_f;
        let mean_y = sum_y / n_f;

        // Centred sums: Sxy / Sxx equals (n Σxy - Σx Σy) / (n Σx² - (Σx)²)
        // without the cancellation of the raw form.
        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for p in selected() {
            let dx = p.x - mean_x;
            let dy = p.y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        let x_floor = n_f * (EPSILON * mean_x.abs().max(1.0)).powi(2);
        if sxx <= x_floor {
            let y_floor = n_f * (EPSILON * mean_y.abs().max(1.0)).powi(2);
            return if syy <= y_floor {
                LineModel::Invalid
            } else {
                LineModel::vertical(mean_x)
            };
        }

        // Keep whichever form leaves the smaller squared residual in its own
        // metric: vertical offsets for y = mx + b, horizontal ones for x = c.
        let vertical_residual = sxx;
        let general_residual = (syy - sxy * sxy / sxx).max(0.0);
        if vertical_residual < general_residual {
            return LineModel::vertical(mean_x);
        }

        let slope = sxy / sxx;
        LineModel::new(slope, mean_y - slope * mean_x)
    }
}
