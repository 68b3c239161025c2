//! Core shared types for point observations.
//!
//! Observations are plain `nalgebra` points. Both fitting variants take their
//! data as a slice of these and never mutate it.

use nalgebra::{Point2, Point3};

/// 2D observation used by the line variant.
pub type Point2D = Point2<f64>;

/// 3D observation used by the plane variant.
pub type Point3D = Point3<f64>;

/// Norm below which a direction (cross product, plane normal) is treated as
/// zero, i.e. the geometry it came from is degenerate.
pub const EPSILON: f64 = 1e-9;
