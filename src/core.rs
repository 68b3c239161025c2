//! Core RANSAC traits and the engine.
//!
//! The engine is written once against a handful of traits:
//! - [`Model`]: a fitted hypothesis that can measure points and tell whether
//!   it is usable.
//! - [`Estimator`]: builds models from minimal samples and refits them from
//!   consensus sets.
//! - [`Sampler`]: draws non-degenerate minimal samples with a bounded budget.
//! - [`TerminationCriterion`]: decides when the loop may stop early.
//!
//! Scoring is fixed to hard-threshold inlier counting
//! ([`InlierCountScoring`]).

use crate::error::RansacError;
use crate::scoring::{InlierCountScoring, Scoring};
use crate::settings::RansacSettings;

/// A geometric hypothesis.
pub trait Model: Clone + std::fmt::Debug {
    /// Observation type the model explains.
    type Point: Copy;

    /// Non-negative distance between `point` and the model.
    ///
    /// Invalid models return `f64::INFINITY`.
    fn residual(&self, point: &Self::Point) -> f64;

    /// Whether the model describes an actual line/plane.
    fn is_valid(&self) -> bool;
}

/// Observation type handled by an estimator.
pub type PointOf<E> = <<E as Estimator>::Model as Model>::Point;

/// Estimator responsible for generating and refining model hypotheses.
pub trait Estimator {
    /// Model type produced by this estimator.
    type Model: Model;

    /// Size of a minimal sample for this estimator.
    fn sample_size(&self) -> usize;

    /// Whether the sampled points determine a well-posed model.
    fn is_valid_sample(&self, points: &[<Self::Model as Model>::Point], sample: &[usize]) -> bool;

    /// Model through a minimal sample. Degenerate samples give an invalid
    /// model.
    fn estimate_model(
        &self,
        points: &[<Self::Model as Model>::Point],
        sample: &[usize],
    ) -> Self::Model;

    /// Least-squares model over an arbitrary subset of the points.
    ///
    /// Numerically degenerate subsets give an invalid model, never a panic.
    fn estimate_model_nonminimal(
        &self,
        points: &[<Self::Model as Model>::Point],
        subset: &[usize],
    ) -> Self::Model;
}

/// Outcome of one sampling request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// A non-degenerate sample was written to the output buffer.
    Accepted { attempts: usize },
    /// The attempt budget ran out without a usable sample.
    Exhausted { attempts: usize },
}

impl Draw {
    pub fn attempts(&self) -> usize {
        match *self {
            Draw::Accepted { attempts } | Draw::Exhausted { attempts } => attempts,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Draw::Accepted { .. })
    }
}

/// Sampler responsible for drawing minimal samples from the data.
pub trait Sampler {
    /// Draw `estimator.sample_size()` indices into `out_indices`, rejecting
    /// samples the estimator deems degenerate.
    ///
    /// Gives up after a bounded number of attempts; the contents of
    /// `out_indices` are unspecified on [`Draw::Exhausted`].
    fn sample<E: Estimator>(
        &mut self,
        estimator: &E,
        points: &[PointOf<E>],
        out_indices: &mut [usize],
    ) -> Draw;
}

/// Loop state handed to a [`TerminationCriterion`] after every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Iterations executed so far, including skipped ones.
    pub iteration: usize,
    pub max_iterations: usize,
    pub best_inlier_count: usize,
    /// Scored iterations since the best model last improved.
    pub no_improvement: usize,
    pub total_points: usize,
    pub sample_size: usize,
}

/// Termination criterion deciding when the loop can stop before its budget
/// is spent.
pub trait TerminationCriterion {
    /// Returns `true` if the loop should stop now.
    fn should_stop(&mut self, progress: &Progress) -> bool;
}

/// Stop once the best model is good enough and has stopped improving.
///
/// Fires when `best_inlier_count >= min_consensus` and the best model has gone
/// more than `stagnation_limit` scored iterations without a strict
/// improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagnationTermination {
    pub min_consensus: usize,
    pub stagnation_limit: usize,
}

impl StagnationTermination {
    pub fn from_settings(settings: &RansacSettings) -> Self {
        Self {
            min_consensus: settings.min_consensus,
            stagnation_limit: settings.stagnation_limit(),
        }
    }
}

impl TerminationCriterion for StagnationTermination {
    fn should_stop(&mut self, progress: &Progress) -> bool {
        progress.best_inlier_count >= self.min_consensus
            && progress.no_improvement > self.stagnation_limit
    }
}

/// Confidence-based RANSAC termination.
///
/// Stops once enough iterations ran to have drawn an all-inlier sample with
/// probability `confidence`, given the current inlier ratio `w`:
/// `N = log(1 - confidence) / log(1 - w^sample_size)`. Like
/// [`StagnationTermination`] it never fires before `min_consensus` inliers
/// were found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceTermination {
    /// Desired confidence in \[0, 1).
    pub confidence: f64,
    pub min_consensus: usize,
}

impl ConfidenceTermination {
    /// Iterations needed for the given inlier ratio, or `None` when the bound
    /// is undefined (no inliers yet, or a degenerate ratio).
    pub fn required_iterations(&self, inlier_ratio: f64, sample_size: usize) -> Option<usize> {
        if !(inlier_ratio > 0.0) {
            return None;
        }
        if inlier_ratio >= 1.0 {
            return Some(1);
        }

        let p_good_sample = inlier_ratio.powi(sample_size as i32);
        let log_one_minus_conf = (1.0 - self.confidence).ln();
        let log_one_minus_p = (1.0 - p_good_sample).ln();
        if !log_one_minus_conf.is_finite() || !log_one_minus_p.is_finite() || log_one_minus_p == 0.0
        {
            return None;
        }

        Some((log_one_minus_conf / log_one_minus_p).ceil().max(1.0) as usize)
    }
}

impl TerminationCriterion for ConfidenceTermination {
    fn should_stop(&mut self, progress: &Progress) -> bool {
        if progress.best_inlier_count < self.min_consensus || progress.total_points == 0 {
            return false;
        }

        let inlier_ratio = progress.best_inlier_count as f64 / progress.total_points as f64;
        self.required_iterations(inlier_ratio, progress.sample_size)
            .is_some_and(|required| progress.iteration >= required)
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The termination criterion fired before the budget was spent.
    Converged,
    /// All `max_iterations` iterations ran.
    BudgetExhausted,
}

/// Diagnostics of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Iterations executed, including skipped ones.
    pub iterations: usize,
    /// Iterations in which the sampler found no non-degenerate sample.
    pub skipped_iterations: usize,
    /// Consensus size of the best minimal-sample hypothesis.
    pub hypothesis_inliers: usize,
    /// Best consensus size after each iteration; never decreases.
    pub best_inlier_trace: Vec<usize>,
    pub stop_reason: StopReason,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RansacOutput<M> {
    /// Least-squares model refined over the best consensus set.
    pub model: M,
    /// Best minimal-sample model, before refinement.
    pub hypothesis: M,
    /// Indices of the points that are inliers of `model`, ascending.
    pub inliers: Vec<usize>,
    /// Size of the dataset.
    pub total_points: usize,
    pub stats: RunStats,
}

impl<M> RansacOutput<M> {
    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }

    pub fn inlier_ratio(&self) -> f64 {
        if self.total_points == 0 {
            return 0.0;
        }
        self.inliers.len() as f64 / self.total_points as f64
    }
}

/// RANSAC engine over a fixed dataset.
///
/// The engine owns the points, the sampler (and with it the random stream),
/// and the termination state. [`Ransac::run`] leaves the engine reusable;
/// every run starts from a clean best-model state.
pub struct Ransac<E, S, T = StagnationTermination>
where
    E: Estimator,
    S: Sampler,
    T: TerminationCriterion,
{
    settings: RansacSettings,
    estimator: E,
    sampler: S,
    scoring: InlierCountScoring,
    termination: T,
    points: Vec<PointOf<E>>,
}

impl<E, S> Ransac<E, S, StagnationTermination>
where
    E: Estimator,
    S: Sampler,
{
    /// Create an engine with the default stagnation-based early stop.
    pub fn new(
        points: Vec<PointOf<E>>,
        settings: RansacSettings,
        estimator: E,
        sampler: S,
    ) -> Result<Self, RansacError> {
        settings.validate(estimator.sample_size())?;

        Ok(Self {
            scoring: InlierCountScoring::new(settings.error_tolerance),
            termination: StagnationTermination::from_settings(&settings),
            settings,
            estimator,
            sampler,
            points,
        })
    }
}

impl<E, S, T> Ransac<E, S, T>
where
    E: Estimator,
    S: Sampler,
    T: TerminationCriterion,
{
    /// Replace the termination criterion.
    pub fn with_termination<T2: TerminationCriterion>(self, termination: T2) -> Ransac<E, S, T2> {
        Ransac {
            settings: self.settings,
            estimator: self.estimator,
            sampler: self.sampler,
            scoring: self.scoring,
            termination,
            points: self.points,
        }
    }

    pub fn settings(&self) -> &RansacSettings {
        &self.settings
    }

    pub fn points(&self) -> &[PointOf<E>] {
        &self.points
    }

    /// Indices of the points `model` explains within the error tolerance.
    pub fn consensus_set(&self, model: &E::Model) -> Vec<usize> {
        self.scoring.consensus_set(&self.points, model)
    }

    /// Mean residual of `model`'s inliers, or `f64::INFINITY` for an invalid
    /// model or one without inliers.
    pub fn evaluate(&self, model: &E::Model) -> f64 {
        self.scoring.evaluate(&self.points, model)
    }

    /// Run the RANSAC loop followed by the least-squares refinement.
    pub fn run(&mut self) -> Result<RansacOutput<E::Model>, RansacError> {
        let total_points = self.points.len();
        let sample_size = self.estimator.sample_size();
        if total_points < sample_size {
            return Err(RansacError::InsufficientData {
                required: sample_size,
                actual: total_points,
            });
        }

        let max_iterations = self.settings.max_iterations;
        log::debug!(
            "RANSAC: {} points, sample size {}, tolerance {}, budget {} iterations",
            total_points,
            sample_size,
            self.settings.error_tolerance,
            max_iterations
        );

        let mut sample = vec![0usize; sample_size];
        let mut candidate_inliers = Vec::with_capacity(total_points);
        let mut best_inliers: Vec<usize> = Vec::new();
        let mut best_model: Option<E::Model> = None;
        let mut no_improvement = 0usize;
        let mut skipped_iterations = 0usize;
        let mut best_inlier_trace = Vec::with_capacity(max_iterations);
        let mut stop_reason = StopReason::BudgetExhausted;
        let mut iteration = 0usize;

        while iteration < max_iterations {
            iteration += 1;

            match self.sampler.sample(&self.estimator, &self.points, &mut sample) {
                Draw::Accepted { .. } => {
                    let candidate = self.estimator.estimate_model(&self.points, &sample);
                    let score = self
                        .scoring
                        .score(&self.points, &candidate, &mut candidate_inliers);

                    // Ties keep the incumbent.
                    if score.inlier_count > best_inliers.len() {
                        log::debug!(
                            "RANSAC: iteration {}: {} -> {} inliers",
                            iteration,
                            best_inliers.len(),
                            score.inlier_count
                        );
                        std::mem::swap(&mut best_inliers, &mut candidate_inliers);
                        best_model = Some(candidate);
                        no_improvement = 0;
                    } else {
                        no_improvement += 1;
                    }
                }
                Draw::Exhausted { attempts } => {
                    log::trace!(
                        "RANSAC: iteration {}: no non-degenerate sample after {} attempts",
                        iteration,
                        attempts
                    );
                    skipped_iterations += 1;
                }
            }

            best_inlier_trace.push(best_inliers.len());

            let progress = Progress {
                iteration,
                max_iterations,
                best_inlier_count: best_inliers.len(),
                no_improvement,
                total_points,
                sample_size,
            };
            if self.termination.should_stop(&progress) {
                stop_reason = StopReason::Converged;
                break;
            }
        }

        log::debug!(
            "RANSAC: stopped after {} iterations ({:?}), best consensus {} of {}",
            iteration,
            stop_reason,
            best_inliers.len(),
            total_points
        );

        let hypothesis_inliers = best_inliers.len();
        if let Some(hypothesis) = best_model.filter(|_| hypothesis_inliers >= sample_size) {
            let model = self
                .estimator
                .estimate_model_nonminimal(&self.points, &best_inliers);

            if model.is_valid() {
                let inliers = self.consensus_set(&model);
                log::debug!(
                    "RANSAC: refined model has {} inliers out of {} points",
                    inliers.len(),
                    total_points
                );
                return Ok(RansacOutput {
                    model,
                    hypothesis,
                    inliers,
                    total_points,
                    stats: RunStats {
                        iterations: iteration,
                        skipped_iterations,
                        hypothesis_inliers,
                        best_inlier_trace,
                        stop_reason,
                    },
                });
            }

            log::warn!(
                "RANSAC: refinement over {} inliers produced an invalid model",
                hypothesis_inliers
            );
        } else {
            log::warn!(
                "RANSAC: no consensus set of at least {} points after {} iterations",
                sample_size,
                iteration
            );
        }

        Err(RansacError::NoConsensusFound {
            required: sample_size,
            best_inliers: hypothesis_inliers,
            iterations: iteration,
        })
    }
}
