//! Shrinking-window grid search.

use ndarray::Array2;
use tracing::{trace, warn};

use crate::error::ExtentError;
use crate::search::window::{DomainEdge, SampleGrid, SearchWindow};
use crate::search::{IterationRecord, Objective, SearchConfig, SearchOutcome, StopReason};

/// Bisection steps per domain edge and iteration, past which float
/// resolution is exhausted anyway.
const MAX_BISECTIONS: usize = 64;

/// A sampled point and its objective value.
#[derive(Clone, Copy, Debug)]
struct Sample {
    x: f64,
    y: f64,
    value: f64,
}

/// Iterative pattern-search minimiser over a 2D box.
#[derive(Clone, Debug)]
pub struct GridSearch {
    config: SearchConfig,
}

impl GridSearch {
    pub fn new(config: SearchConfig) -> Result<Self, ExtentError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Locate an approximate minimum of `objective` inside `window`.
    pub fn minimize<O: Objective + ?Sized>(
        &self,
        window: SearchWindow,
        objective: &O,
    ) -> Result<SearchOutcome, ExtentError> {
        self.minimize_traced(window, objective, |_| {})
    }

    /// Like [`GridSearch::minimize`], calling `on_iteration` after every grid
    /// evaluation.
    ///
    /// Fails with [`ExtentError::UnprojectableRegion`] if the first grid is all
    /// NaN. Always stops within `max_iterations` grid evaluations.
    pub fn minimize_traced<O, F>(
        &self,
        window: SearchWindow,
        objective: &O,
        mut on_iteration: F,
    ) -> Result<SearchOutcome, ExtentError>
    where
        O: Objective + ?Sized,
        F: FnMut(&IterationRecord),
    {
        let (nx, ny) = self.config.samples;
        let tol_x = self.config.tolerance * window.width();
        let tol_y = self.config.tolerance * window.height();

        let mut current = window;
        let mut best: Option<Sample> = None;
        let mut stop = StopReason::IterationLimit;
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let grid = SampleGrid::new(current, nx, ny);
            let (mx, my) = grid.mesh();
            let values = objective.evaluate(&mx, &my)?;
            if values.dim() != grid.dim() {
                return Err(ExtentError::ObjectiveShape {
                    expected: grid.dim(),
                    found: values.dim(),
                });
            }

            let Some((i, j)) = grid.argmin(&values) else {
                if best.is_none() {
                    return Err(ExtentError::UnprojectableRegion {
                        x0: current.x0,
                        x1: current.x1,
                        y0: current.y0,
                        y1: current.y1,
                    });
                }
                warn!(
                    iteration = iterations,
                    x0 = current.x0,
                    x1 = current.x1,
                    y0 = current.y0,
                    y1 = current.y1,
                    "refined grid has no valid samples, keeping best earlier sample"
                );
                stop = StopReason::NoValidSamples;
                break;
            };

            // Minima on the rim of the objective's domain fall between
            // samples; locate the rim before picking the next window
            let mut winner = Sample {
                x: grid.xs()[i],
                y: grid.ys()[j],
                value: values[(j, i)],
            };
            let edges = grid.domain_edges(&values);
            let domain_edges = edges.len();
            let mut on_rim = false;
            if let Some(rim) = refine_edges(objective, edges, tol_x, tol_y)? {
                if rim.value < winner.value {
                    winner = rim;
                    on_rim = true;
                }
            }
            if best.map_or(true, |b| winner.value < b.value) {
                best = Some(winner);
            }

            let candidate = if on_rim {
                grid.around(winner.x, winner.y)
            } else {
                grid.neighbourhood(i, j)
            };
            let (min_value, max_value, valid_samples) = spread(&values);
            let record = IterationRecord {
                iteration: iterations,
                window: current,
                candidate,
                min_value,
                max_value,
                valid_samples,
                domain_edges,
            };
            trace!(
                iteration = record.iteration,
                x0 = current.x0,
                x1 = current.x1,
                y0 = current.y0,
                y1 = current.y1,
                min_value,
                max_value,
                valid_samples,
                domain_edges,
                on_rim,
                "grid search iteration"
            );
            on_iteration(&record);

            if candidate == current {
                stop = StopReason::Stalled;
                break;
            }
            current = candidate;
            if settled(current.width(), tol_x) && settled(current.height(), tol_y) {
                stop = StopReason::Tolerance;
                break;
            }
        }

        // best is always set here: an all-NaN first grid returned early
        let best = best.ok_or(ExtentError::UnprojectableRegion {
            x0: window.x0,
            x1: window.x1,
            y0: window.y0,
            y1: window.y1,
        })?;

        let (cx, cy) = current.centre();
        let centre_value = evaluate_points(objective, &[(cx, cy)])?
            .first()
            .copied()
            .unwrap_or(f64::NAN);

        // The centre can be worse than a sample, e.g. straddling a cut
        let (point, value) = if centre_value <= best.value {
            ((cx, cy), centre_value)
        } else {
            ((best.x, best.y), best.value)
        };

        Ok(SearchOutcome {
            point,
            value,
            window: current,
            iterations,
            stop,
        })
    }
}

/// Objective values at scattered points, evaluated in one batch.
fn evaluate_points<O: Objective + ?Sized>(
    objective: &O,
    points: &[(f64, f64)],
) -> Result<Vec<f64>, ExtentError> {
    let n = points.len();
    let xs = Array2::from_shape_fn((1, n), |(_, k)| points[k].0);
    let ys = Array2::from_shape_fn((1, n), |(_, k)| points[k].1);
    let values = objective.evaluate(&xs, &ys)?;
    if values.dim() != (1, n) {
        return Err(ExtentError::ObjectiveShape {
            expected: (1, n),
            found: values.dim(),
        });
    }
    Ok(values.iter().copied().collect())
}

/// Bisect every edge towards the rim of the objective's domain until it is
/// shorter than the axis tolerance, then return the lowest point found on
/// the defined side. All edges advance together, one batch per step.
fn refine_edges<O: Objective + ?Sized>(
    objective: &O,
    mut edges: Vec<DomainEdge>,
    tol_x: f64,
    tol_y: f64,
) -> Result<Option<Sample>, ExtentError> {
    let mut active: Vec<usize> = (0..edges.len()).collect();
    let mut steps = 0;
    while !active.is_empty() && steps < MAX_BISECTIONS {
        steps += 1;
        let mids: Vec<(f64, f64)> = active.iter().map(|&k| edges[k].midpoint()).collect();
        let values = evaluate_points(objective, &mids)?;

        let mut still_long = Vec::with_capacity(active.len());
        for ((&k, &mid), &value) in active.iter().zip(&mids).zip(&values) {
            let edge = &mut edges[k];
            if mid == edge.inside || mid == edge.outside {
                continue;
            }
            if value.is_nan() {
                edge.outside = mid;
            } else {
                edge.inside = mid;
                edge.value = value;
            }
            let tolerance = if edge.along_x() { tol_x } else { tol_y };
            if edge.length() > tolerance {
                still_long.push(k);
            }
        }
        active = still_long;
    }

    let lowest = edges
        .iter()
        .fold(None::<Sample>, |lowest, e| match lowest {
            Some(l) if e.value >= l.value => Some(l),
            _ => Some(Sample {
                x: e.inside.0,
                y: e.inside.1,
                value: e.value,
            }),
        });
    Ok(lowest)
}

fn settled(extent: f64, tolerance: f64) -> bool {
    extent < tolerance || extent == 0.0
}

/// Smallest and largest finite value, and how many values are not NaN.
fn spread(values: &Array2<f64>) -> (f64, f64, usize) {
    values.iter().filter(|v| !v.is_nan()).fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0),
        |(lo, hi, n), &v| {
            if v.is_finite() {
                (lo.min(v), hi.max(v), n + 1)
            } else {
                (lo, hi, n + 1)
            }
        },
    )
}
