//! Geometric models fitted by the RANSAC engine.
//!
//! Each model knows how to build itself from a minimal sample, how far a point
//! lies from it, and whether it is usable at all. Invalid models are ordinary
//! values (not `Option`s) so the engine can treat "no model" uniformly: their
//! residual is infinite and they never gather inliers.

use nalgebra::Vector3;

use crate::core::Model;
use crate::types::{EPSILON, Point2D, Point3D};

/// 2D line.
///
/// The slope-intercept form cannot express vertical lines, so they get their
/// own variant rather than an approximating huge slope.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineModel {
    /// `y = slope * x + intercept`
    General { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
    /// No line could be determined.
    #[default]
    Invalid,
}

impl LineModel {
    /// Line `y = slope * x + intercept`.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self::General { slope, intercept }
    }

    /// Vertical line through `x`.
    pub fn vertical(x: f64) -> Self {
        Self::Vertical { x }
    }

    /// Line through two points.
    ///
    /// Coincident points determine no line and yield [`LineModel::Invalid`];
    /// points sharing the same `x` yield a vertical line.
    pub fn fit_minimal(p1: &Point2D, p2: &Point2D) -> Self {
        if p1 == p2 {
            return Self::Invalid;
        }

        let dx = p2.x - p1.x;
        if dx == 0.0 {
            return Self::Vertical { x: p1.x };
        }

        let slope = (p2.y - p1.y) / dx;
        Self::General {
            slope,
            intercept: p1.y - slope * p1.x,
        }
    }

    /// Evaluate `y` at `x` for a general line.
    pub fn predict(&self, x: f64) -> Option<f64> {
        match *self {
            Self::General { slope, intercept } => Some(slope * x + intercept),
            _ => None,
        }
    }

    /// Slope of a general line.
    pub fn slope(&self) -> Option<f64> {
        match *self {
            Self::General { slope, .. } => Some(slope),
            _ => None,
        }
    }

    /// `y` intercept of a general line.
    pub fn intercept(&self) -> Option<f64> {
        match *self {
            Self::General { intercept, .. } => Some(intercept),
            _ => None,
        }
    }
}

impl Model for LineModel {
    type Point = Point2D;

    /// Vertical distance for general lines, horizontal distance for vertical
    /// ones.
    fn residual(&self, point: &Point2D) -> f64 {
        match *self {
            Self::General { slope, intercept } => (slope * point.x + intercept - point.y).abs(),
            Self::Vertical { x } => (point.x - x).abs(),
            Self::Invalid => f64::INFINITY,
        }
    }

    fn is_valid(&self) -> bool {
        match *self {
            Self::General { slope, intercept } => slope.is_finite() && intercept.is_finite(),
            Self::Vertical { x } => x.is_finite(),
            Self::Invalid => false,
        }
    }
}

/// Plane `normal . p + offset = 0` with a unit normal.
///
/// A zero normal marks the invalid plane returned when no plane could be
/// determined.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneModel {
    normal: Vector3<f64>,
    offset: f64,
}

impl Default for PlaneModel {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PlaneModel {
    pub fn invalid() -> Self {
        Self {
            normal: Vector3::zeros(),
            offset: 0.0,
        }
    }

    /// Plane through three points.
    ///
    /// Collinear or coincident points give an invalid plane.
    pub fn fit_minimal(p1: &Point3D, p2: &Point3D, p3: &Point3D) -> Self {
        let cross = (p2 - p1).cross(&(p3 - p1));
        let norm = cross.norm();
        // NaN lands here too.
        if !(norm >= EPSILON) {
            return Self::invalid();
        }

        let normal = cross / norm;
        Self {
            normal,
            offset: -normal.dot(&p1.coords),
        }
    }

    /// Plane through `point` with the given normal, normalized on the way in.
    pub fn from_normal_and_point(normal: &Vector3<f64>, point: &Point3D) -> Self {
        let norm = normal.norm();
        if !(norm >= EPSILON) {
            return Self::invalid();
        }

        let normal = normal / norm;
        Self {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// Unit normal, or the zero vector for an invalid plane.
    pub fn normal(&self) -> &Vector3<f64> {
        &self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Coefficients `[a, b, c, d]` of `ax + by + cz + d = 0`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.offset]
    }

    /// Distance along the normal, positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3D) -> f64 {
        self.normal.dot(&point.coords) + self.offset
    }
}

impl Model for PlaneModel {
    type Point = Point3D;

    fn residual(&self, point: &Point3D) -> f64 {
        if !self.is_valid() {
            return f64::INFINITY;
        }
        self.signed_distance(point).abs()
    }

    fn is_valid(&self) -> bool {
        self.normal.norm() > EPSILON && self.offset.is_finite()
    }
}
