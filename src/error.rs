use thiserror::Error;

/// Errors reported by a RANSAC run.
///
/// Degenerate samples and numerically degenerate refinements are absorbed
/// inside the run and never show up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RansacError {
    /// Fewer points than the minimal sample size were supplied.
    #[error("model fitting requires at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimal sample size of the model being fitted
        required: usize,
        /// Number of points in the dataset
        actual: usize,
    },

    /// The loop finished without a usable consensus set, or the final
    /// least-squares refinement of the best set failed.
    #[error(
        "no consensus set of at least {required} points was found \
         (best: {best_inliers} inliers after {iterations} iterations)"
    )]
    NoConsensusFound {
        /// Minimal sample size of the model being fitted
        required: usize,
        /// Size of the largest consensus set seen during the run
        best_inliers: usize,
        /// Number of iterations executed
        iterations: usize,
    },

    /// Settings violate their documented constraints.
    #[error("invalid RANSAC settings: {0}")]
    InvalidSettings(String),
}
