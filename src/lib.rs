//! # Consensus Fit - Robust Line and Plane Fitting with RANSAC
//!
//! `consensus-fit` fits a 2D line or a 3D plane to point sets contaminated by
//! outliers. A hypothesis is built from a random minimal sample, scored by
//! counting the points within an error tolerance, and the best one is refined
//! by least squares over its consensus set.
//!
//! ## Quick Start
//!
//! The easiest way to use `consensus-fit` is through the high-level API
//! functions:
//!
//! ```rust
//! use consensus_fit::{LineModel, Point2D, RansacSettings, estimate_line};
//!
//! let points = vec![
//!     Point2D::new(0.0, 1.0),
//!     Point2D::new(1.0, 3.0),
//!     Point2D::new(2.0, 5.0),
//!     Point2D::new(3.0, 7.0),
//!     Point2D::new(4.0, 9.0),
//!     Point2D::new(2.0, 40.0), // outlier
//! ];
//! let settings = RansacSettings {
//!     error_tolerance: 0.1,
//!     min_consensus: 4,
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let result = estimate_line(&points, Some(settings)).unwrap();
//! assert_eq!(result.inliers, vec![0, 1, 2, 3, 4]);
//! if let LineModel::General { slope, intercept } = result.model {
//!     assert!((slope - 2.0).abs() < 1e-9);
//!     assert!((intercept - 1.0).abs() < 1e-9);
//! }
//! ```
//!
//! ## Extending the Library
//!
//! The engine is generic over a few traits:
//!
//! - **[`Model`](core::Model)**: a hypothesis that measures residuals
//! - **[`Estimator`](core::Estimator)**: minimal and least-squares fitting
//! - **[`Sampler`](core::Sampler)**: how minimal samples are drawn
//! - **[`TerminationCriterion`](core::TerminationCriterion)**: early stopping
//!
//! Custom samplers and stopping rules plug into [`Ransac`](core::Ransac)
//! directly:
//!
//! ```rust
//! use consensus_fit::core::{Progress, TerminationCriterion};
//! use consensus_fit::{LineRansac, Point2D, RansacSettings};
//!
//! /// Stop as soon as half of the points agree.
//! struct HalfAgree;
//!
//! impl TerminationCriterion for HalfAgree {
//!     fn should_stop(&mut self, progress: &Progress) -> bool {
//!         2 * progress.best_inlier_count >= progress.total_points
//!     }
//! }
//!
//! let points: Vec<Point2D> = (0..10).map(|i| Point2D::new(i as f64, 3.0)).collect();
//! let settings = RansacSettings { random_seed: Some(1), ..Default::default() };
//! let mut ransac = LineRansac::from_points(points, settings)
//!     .unwrap()
//!     .with_termination(HalfAgree);
//! let result = ransac.run().unwrap();
//! assert_eq!(result.stats.iterations, 1);
//! ```
//!
//! ## Modules
//!
//! - **[`api`](api)**: Ready-made engines and one-call fitting functions
//! - **[`core`](core)**: Core traits and the RANSAC engine
//! - **[`estimators`](estimators)**: Line and plane estimators
//! - **[`samplers`](samplers)**: Minimal-sample strategies
//! - **[`scoring`](scoring)**: Inlier counting
//! - **[`models`](models)**: Line and plane models
//! - **[`settings`](settings)**: Run configuration

pub mod api;
pub mod core;
pub mod error;
pub mod estimators;
pub mod models;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod types;
pub mod utils;

// Re-export high-level API
pub use api::{LineRansac, PlaneRansac, estimate_line, estimate_plane};

// Re-export core traits for easy access
pub use core::{
    ConfidenceTermination, Estimator, Model, Ransac, RansacOutput, RunStats, Sampler,
    StagnationTermination, StopReason, TerminationCriterion,
};

pub use error::RansacError;
pub use estimators::{LineEstimator, PlaneEstimator};
pub use models::{LineModel, PlaneModel};
pub use samplers::{PermutationSampler, UniformRandomSampler};
pub use settings::RansacSettings;
pub use types::{Point2D, Point3D};
