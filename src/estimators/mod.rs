//! Estimators for geometric models.
//!
//! Each estimator pairs a minimal solver (delegating to the model's own
//! `fit_minimal`) with a least-squares refiner over arbitrary consensus sets:
//! - Line estimation (2-point sample, ordinary least squares)
//! - Plane estimation (3-point sample, centroid + smallest-eigenvector fit)

pub mod line;
pub mod plane;

pub use line::LineEstimator;
pub use plane::PlaneEstimator;
