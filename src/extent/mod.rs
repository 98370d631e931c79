//! Target-space bounding boxes of source rectangles.
//!
//! Each of the four target bounds is the minimum of a signed target
//! coordinate over the source rectangle, located with [`GridSearch`] and then
//! read back through the transform.

pub mod boundary;
pub mod limits;

use std::fmt;

use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::ExtentError;
use crate::search::{
    GridSearch, Objective, SearchConfig, SearchOutcome, SearchWindow, StopReason,
};
use crate::transform::{CoordinateSystem, PointTransform, TransformEvaluator};

pub use boundary::boundary_extent;
pub use limits::TargetLimits;

/// One of the four target-space bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extremum {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

impl Extremum {
    pub const ALL: [Extremum; 4] = [
        Extremum::MinX,
        Extremum::MaxX,
        Extremum::MinY,
        Extremum::MaxY,
    ];

    fn is_x(self) -> bool {
        matches!(self, Extremum::MinX | Extremum::MaxX)
    }

    /// Factor turning the bound into a minimisation target.
    fn sign(self) -> f64 {
        match self {
            Extremum::MinX | Extremum::MinY => 1.0,
            Extremum::MaxX | Extremum::MaxY => -1.0,
        }
    }

    fn pick(self, x: f64, y: f64) -> f64 {
        if self.is_x() {
            x
        } else {
            y
        }
    }
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Extremum::MinX => "min-x",
            Extremum::MaxX => "max-x",
            Extremum::MinY => "min-y",
            Extremum::MaxY => "max-y",
        };
        f.write_str(name)
    }
}

/// Axis-aligned box in target coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// `(x_min, x_max, y_min, y_max)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        other.x_min >= self.x_min
            && other.x_max <= self.x_max
            && other.y_min >= self.y_min
            && other.y_max <= self.y_max
    }
}

/// A bound whose search stopped before reaching tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NonConvergence {
    pub extremum: Extremum,
    pub iterations: usize,
    pub stop: StopReason,
}

impl fmt::Display for NonConvergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} search did not converge after {} iterations ({:?})",
            self.extremum, self.iterations, self.stop
        )
    }
}

/// Bounding box of a projected region.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtentResult {
    pub bounds: Bounds,
    /// Bounds that are best estimates rather than converged searches.
    pub non_converged: Vec<NonConvergence>,
}

impl ExtentResult {
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        self.bounds.as_tuple()
    }

    /// True when all four searches converged.
    pub fn is_exact(&self) -> bool {
        self.non_converged.is_empty()
    }
}

/// Signed target coordinate as a search objective. Non-finite target
/// coordinates count as undefined.
struct ExtremumObjective<'a, T: ?Sized> {
    evaluator: TransformEvaluator<'a, T>,
    extremum: Extremum,
}

impl<T: PointTransform + ?Sized> Objective for ExtremumObjective<'_, T> {
    fn evaluate(&self, xs: &Array2<f64>, ys: &Array2<f64>) -> Result<Array2<f64>, ExtentError> {
        let (tx, ty) = self.evaluator.evaluate(xs, ys)?;
        let component = if self.extremum.is_x() { tx } else { ty };
        let sign = self.extremum.sign();
        Ok(component.mapv_into(|v| if v.is_finite() { sign * v } else { f64::NAN }))
    }
}

/// Where one bound was found and its value.
struct Located {
    extremum: Extremum,
    outcome: SearchOutcome,
    bound: f64,
}

/// Runs the four bound searches for a source rectangle.
#[derive(Clone, Debug)]
pub struct ExtentSolver {
    search: GridSearch,
    parallel: bool,
}

impl ExtentSolver {
    pub fn new(config: SearchConfig) -> Result<Self, ExtentError> {
        Ok(Self {
            search: GridSearch::new(config)?,
            parallel: true,
        })
    }

    /// Run the four searches one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        self.search.config()
    }

    /// Bounding box in target space of `region = (x_min, x_max, y_min, y_max)`
    /// in source space.
    pub fn solve<T: PointTransform + ?Sized>(
        &self,
        transform: &T,
        region: (f64, f64, f64, f64),
    ) -> Result<ExtentResult, ExtentError> {
        let (x_min, x_max, y_min, y_max) = region;
        let window = SearchWindow::region(x_min, x_max, y_min, y_max)?;

        let located: Vec<Located> = if self.parallel {
            Extremum::ALL
                .par_iter()
                .map(|&extremum| self.locate(transform, window, extremum))
                .collect::<Result<_, _>>()?
        } else {
            Extremum::ALL
                .iter()
                .map(|&extremum| self.locate(transform, window, extremum))
                .collect::<Result<_, _>>()?
        };

        let bounds = Bounds {
            x_min: located[0].bound,
            x_max: located[1].bound,
            y_min: located[2].bound,
            y_max: located[3].bound,
        };
        if bounds.x_min > bounds.x_max {
            return Err(ExtentError::InvertedExtent {
                axis: 'x',
                min: bounds.x_min,
                max: bounds.x_max,
            });
        }
        if bounds.y_min > bounds.y_max {
            return Err(ExtentError::InvertedExtent {
                axis: 'y',
                min: bounds.y_min,
                max: bounds.y_max,
            });
        }

        let non_converged: Vec<NonConvergence> = located
            .iter()
            .filter(|l| !l.outcome.converged())
            .map(|l| NonConvergence {
                extremum: l.extremum,
                iterations: l.outcome.iterations,
                stop: l.outcome.stop,
            })
            .collect();
        for nc in &non_converged {
            warn!(
                extremum = %nc.extremum,
                iterations = nc.iterations,
                stop = ?nc.stop,
                "extent bound is approximate"
            );
        }

        Ok(ExtentResult {
            bounds,
            non_converged,
        })
    }

    fn locate<T: PointTransform + ?Sized>(
        &self,
        transform: &T,
        window: SearchWindow,
        extremum: Extremum,
    ) -> Result<Located, ExtentError> {
        let objective = ExtremumObjective {
            evaluator: TransformEvaluator::new(transform),
            extremum,
        };
        let outcome = self.search.minimize(window, &objective)?;

        let (px, py) = outcome.point;
        let (tx, ty) = objective.evaluator.evaluate_point(px, py)?;
        let bound = extremum.pick(tx, ty);
        if !bound.is_finite() {
            return Err(ExtentError::UnprojectableRegion {
                x0: window.x0,
                x1: window.x1,
                y0: window.y0,
                y1: window.y1,
            });
        }

        debug!(
            extremum = %extremum,
            iterations = outcome.iterations,
            stop = ?outcome.stop,
            x = px,
            y = py,
            bound,
            "located extent bound"
        );
        Ok(Located {
            extremum,
            outcome,
            bound,
        })
    }
}

/// Bounding box in `target` of the rectangle
/// `region = (x_min, x_max, y_min, y_max)` given in `source`.
///
/// `sample_resolution` is the `(nx, ny)` grid used by each search; both must
/// be at least 3. Other settings are [`SearchConfig::default`].
pub fn projected_extent<C: CoordinateSystem + ?Sized>(
    source: &C,
    region: (f64, f64, f64, f64),
    target: &C,
    sample_resolution: (usize, usize),
) -> Result<ExtentResult, ExtentError> {
    let (nx, ny) = sample_resolution;
    let solver = ExtentSolver::new(SearchConfig::default().with_samples(nx, ny))?;
    let transform = source.transform_to(target)?;
    solver.solve(&transform, region)
}
