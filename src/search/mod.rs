//! Derivative-free minimisation of a scalar field over a 2D box.
//!
//! Coarse-to-fine pattern search: sample a grid over the current window,
//! shrink the window to the one-cell neighbourhood of the best sample, and
//! repeat until the window is small enough or stops shrinking. Where the
//! objective is undefined on part of the grid, the rim of its domain is
//! bisected between samples so minima lying on the rim are not lost. Sampling
//! instead of gradients keeps the search usable across discontinuities
//! (antimeridian cuts, polar singularities) and NaN holes in the objective.

pub mod optimizer;
pub mod window;

use ndarray::Array2;

use crate::error::ExtentError;

pub use optimizer::GridSearch;
pub use window::{DomainEdge, SampleGrid, SearchWindow};

/// Scalar objective evaluated over whole sample meshes.
///
/// Returns an array of the same shape as `xs`. NaN marks points where the
/// objective is undefined; they are never selected as a minimum.
pub trait Objective: Sync {
    fn evaluate(&self, xs: &Array2<f64>, ys: &Array2<f64>) -> Result<Array2<f64>, ExtentError>;
}

impl<F> Objective for F
where
    F: Fn(&Array2<f64>, &Array2<f64>) -> Result<Array2<f64>, ExtentError> + Sync,
{
    fn evaluate(&self, xs: &Array2<f64>, ys: &Array2<f64>) -> Result<Array2<f64>, ExtentError> {
        self(xs, ys)
    }
}

/// Grid search settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Samples per axis `(nx, ny)`, each at least 3.
    pub samples: (usize, usize),
    /// Stop once the window is narrower than this fraction of the initial
    /// window on both axes.
    pub tolerance: f64,
    /// Hard bound on grid refinements.
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            samples: (77, 77),
            tolerance: 1e-9,
            max_iterations: 50,
        }
    }
}

impl SearchConfig {
    pub fn with_samples(mut self, nx: usize, ny: usize) -> Self {
        self.samples = (nx, ny);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), ExtentError> {
        let (nx, ny) = self.samples;
        if nx < 3 || ny < 3 {
            return Err(ExtentError::InvalidRegion(format!(
                "sample counts must be at least 3, got ({nx}, {ny})"
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ExtentError::InvalidRegion(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ExtentError::InvalidRegion(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Why a search run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The window shrank below tolerance on both axes.
    Tolerance,
    /// The neighbourhood of the best sample was the whole window.
    Stalled,
    /// The iteration bound was reached first.
    IterationLimit,
    /// A refined grid had no valid samples; the best earlier sample was kept.
    NoValidSamples,
}

impl StopReason {
    pub fn is_converged(self) -> bool {
        matches!(self, StopReason::Tolerance | StopReason::Stalled)
    }
}

/// What happened in one refinement step, passed to the trace hook.
#[derive(Clone, Copy, Debug)]
pub struct IterationRecord {
    pub iteration: usize,
    pub window: SearchWindow,
    pub candidate: SearchWindow,
    /// Smallest finite value on the grid.
    pub min_value: f64,
    /// Largest finite value on the grid.
    pub max_value: f64,
    pub valid_samples: usize,
    /// Valid samples paired with an undefined neighbour, bisected towards
    /// the rim of the objective's domain.
    pub domain_edges: usize,
}

/// Result of one search run.
#[derive(Clone, Copy, Debug)]
pub struct SearchOutcome {
    /// Source-space location of the minimum found.
    pub point: (f64, f64),
    /// Objective value at `point`.
    pub value: f64,
    /// Window the search ended on.
    pub window: SearchWindow,
    pub iterations: usize,
    pub stop: StopReason,
}

impl SearchOutcome {
    pub fn converged(&self) -> bool {
        self.stop.is_converged()
    }
}
