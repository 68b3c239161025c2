//! Plane estimator for 3D plane fitting.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};

use crate::core::Estimator;
use crate::models::PlaneModel;
use crate::types::{EPSILON, Point3D};

/// Plane estimator for 3D plane fitting.
///
/// Minimal fits go through [`PlaneModel::fit_minimal`]. Refinement is a total
/// least-squares fit: the plane passes through the centroid and its normal is
/// the direction of least variance of the centred points.
///
/// Normal orientation is made deterministic by pointing the normal away from
/// the origin side, i.e. `normal . centroid <= 0`. For planes through the
/// origin, where that dot product vanishes, the largest-magnitude normal
/// component is made positive instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneEstimator;

impl PlaneEstimator {
    pub fn new() -> Self {
        Self
    }
}

/// Whether the points span a plane, using the same cross-product test the
/// minimal fit applies to a single triple.
///
/// Anchors at the first point, pairs it with the point farthest from it, and
/// looks for a third point leaving a non-vanishing cross product.
fn spans_plane<'a>(mut points: impl Iterator<Item = &'a Point3D> + Clone) -> bool {
    let Some(anchor) = points.next() else {
        return false;
    };
    let far = points
        .clone()
        .map(|p| p - anchor)
        .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()));
    let Some(axis) = far else {
        return false;
    };

    points.any(|p| axis.cross(&(p - anchor)).norm() >= EPSILON)
}

/// Flip `normal` into the documented orientation for a plane through
/// `centroid`.
fn orient_normal(normal: Vector3<f64>, centroid: &Point3D) -> Vector3<f64> {
    let alignment = normal.dot(&centroid.coords);
    let flip = if alignment.abs() > EPSILON * centroid.coords.norm().max(1.0) {
        alignment > 0.0
    } else {
        normal[normal.iamax()] < 0.0
    };

    if flip { -normal } else { normal }
}

impl Estimator for PlaneEstimator {
    type Model = PlaneModel;

    fn sample_size(&self) -> usize {
        3
    }

    fn is_valid_sample(&self, points: &[Point3D], sample: &[usize]) -> bool {
        match *sample {
            [i, j, k] => match (points.get(i), points.get(j), points.get(k)) {
                (Some(p1), Some(p2), Some(p3)) => (p2 - p1).cross(&(p3 - p1)).norm() >= EPSILON,
                _ => false,
            },
            _ => false,
        }
    }

    fn estimate_model(&self, points: &[Point3D], sample: &[usize]) -> PlaneModel {
        match *sample {
            [i, j, k] => match (points.get(i), points.get(j), points.get(k)) {
                (Some(p1), Some(p2), Some(p3)) => PlaneModel::fit_minimal(p1, p2, p3),
                _ => PlaneModel::invalid(),
            },
            _ => self.estimate_model_nonminimal(points, sample),
        }
    }

    fn estimate_model_nonminimal(&self, points: &[Point3D], subset: &[usize]) -> PlaneModel {
        let selected = || subset.iter().filter_map(|&idx| points.get(idx));

        let n = selected().count();
        if n < self.sample_size() || !spans_plane(selected()) {
            return PlaneModel::invalid();
        }

        let sum = selected().fold(Vector3::zeros(), |acc, p| acc + p.coords);
        let centroid = Point3D::from(sum / n as f64);

        let covariance = selected().fold(Matrix3::zeros(), |acc, p| {
            let d = p - centroid;
            acc + d * d.transpose()
        });

        let eigen = SymmetricEigen::new(covariance);
        if !eigen.eigenvalues.iter().all(|v| v.is_finite()) {
            return PlaneModel::invalid();
        }
        let smallest = eigen.eigenvalues.imin();

        let normal = orient_normal(eigen.eigenvectors.column(smallest).into_owned(), &centroid);
        PlaneModel::from_normal_and_point(&normal, &centroid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Model;

    /// Points of 2x + 0.5y - z + 1 = 0.
    fn tilted_plane() -> Vec<Point3D> {
        [(1.0, 1.0), (2.0, 1.0), (1.0, 2.0), (3.0, 2.0), (0.0, 0.0), (2.5, 1.5)]
            .iter()
            .map(|&(x, y)| Point3D::new(x, y, 2.0 * x + 0.5 * y + 1.0))
            .collect()
    }

    #[test]
    fn sample_validity() {
        let data = vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
        ];
        let estimator = PlaneEstimator::new();

        assert!(estimator.is_valid_sample(&data, &[0, 1, 3]));
        assert!(!estimator.is_valid_sample(&data, &[0, 1, 2]));
        assert!(!estimator.is_valid_sample(&data, &[0, 0, 3]));
        assert!(!estimator.is_valid_sample(&data, &[0, 1, 9]));
        assert!(!estimator.is_valid_sample(&data, &[0, 1]));
    }

    #[test]
    fn refinement_recovers_exact_plane() {
        let data = tilted_plane();
        let subset: Vec<usize> = (0..data.len()).collect();
        let plane = PlaneEstimator::new().estimate_model_nonminimal(&data, &subset);

        assert!(plane.is_valid());
        let norm = 5.25f64.sqrt();
        let expected = [2.0 / norm, 0.5 / norm, -1.0 / norm, 1.0 / norm];
        for (got, want) in plane.coefficients().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
        for p in &data {
            assert!(plane.residual(p) < 1e-9);
        }
    }

    #[test]
    fn normal_orientation_ignores_point_order() {
        let data = tilted_plane();
        let estimator = PlaneEstimator::new();

        let forward = estimator.estimate_model_nonminimal(&data, &[0, 1, 2, 3, 4, 5]);
        let shuffled = estimator.estimate_model_nonminimal(&data, &[3, 5, 0, 4, 2, 1]);
        let reversed = estimator.estimate_model_nonminimal(&data, &[5, 4, 3, 2, 1, 0]);

        for other in [shuffled, reversed] {
            assert!((forward.normal() - other.normal()).norm() < 1e-9);
            assert!((forward.offset() - other.offset()).abs() < 1e-9);
        }

        let centroid = data.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 6.0;
        assert!(forward.normal().dot(&centroid) <= 0.0);
    }

    #[test]
    fn plane_through_origin_uses_dominant_component() {
        let data = vec![
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(-1.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, -1.0, 0.0),
        ];
        let estimator = PlaneEstimator::new();

        for subset in [[0, 1, 2, 3], [3, 2, 1, 0]] {
            let plane = estimator.estimate_model_nonminimal(&data, &subset);
            assert!((plane.normal() - Vector3::z()).norm() < 1e-12);
            assert!(plane.offset().abs() < 1e-12);
        }
    }

    #[test]
    fn thin_but_planar_sets_are_refined() {
        let mut data: Vec<Point3D> = (0..10).map(|i| Point3D::new(100.0 * i as f64, 0.0, 0.0)).collect();
        data.push(Point3D::new(500.0, 1e-4, 0.0));
        let subset: Vec<usize> = (0..data.len()).collect();
        let estimator = PlaneEstimator::new();

        assert!(estimator.is_valid_sample(&data, &[0, 1, 10]));
        let plane = estimator.estimate_model_nonminimal(&data, &subset);
        assert!(plane.is_valid());
        assert!(plane.normal().x.abs() < 1e-9);
        for p in &data {
            assert!(plane.residual(p) < 1e-5);
        }
    }

    #[test]
    fn refinement_is_idempotent() {
        let mut data = tilted_plane();
        data.push(Point3D::new(0.5, 1.5, 2.8));
        let subset: Vec<usize> = (0..data.len()).collect();
        let estimator = PlaneEstimator::new();

        let a = estimator.estimate_model_nonminimal(&data, &subset);
        let b = estimator.estimate_model_nonminimal(&data, &subset);
        assert_eq!(a.coefficients(), b.coefficients());
    }

    #[test]
    fn degenerate_sets_give_invalid_planes() {
        let estimator = PlaneEstimator::new();

        let two = vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 1.0, 1.0)];
        assert!(!estimator.estimate_model_nonminimal(&two, &[0, 1]).is_valid());

        let collinear: Vec<Point3D> = (0..5).map(|i| Point3D::new(i as f64, 2.0 * i as f64, 1.0)).collect();
        assert!(!estimator.estimate_model_nonminimal(&collinear, &[0, 1, 2, 3, 4]).is_valid());

        let coincident = vec![Point3D::new(1.0, 2.0, 3.0); 4];
        assert!(!estimator.estimate_model_nonminimal(&coincident, &[0, 1, 2, 3]).is_valid());
    }
}
