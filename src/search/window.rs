//! Search windows and the sample grids spanning them.

use ndarray::{Array1, Array2};

use crate::error::ExtentError;

/// Axis-aligned rectangle in source-coordinate space, `x0 <= x1`, `y0 <= y1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchWindow {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl SearchWindow {
    /// Create a window, rejecting non-finite or reversed bounds and extents
    /// too large to represent.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self, ExtentError> {
        if ![x0, x1, y0, y1].iter().all(|v| v.is_finite()) {
            return Err(ExtentError::InvalidRegion(format!(
                "bounds must be finite, got x=[{x0}, {x1}], y=[{y0}, {y1}]"
            )));
        }
        if x0 > x1 || y0 > y1 {
            return Err(ExtentError::InvalidRegion(format!(
                "bounds are reversed: x=[{x0}, {x1}], y=[{y0}, {y1}]"
            )));
        }
        let window = Self { x0, x1, y0, y1 };
        if !window.width().is_finite() || !window.height().is_finite() {
            return Err(ExtentError::InvalidRegion(format!(
                "extent overflows: x=[{x0}, {x1}], y=[{y0}, {y1}]"
            )));
        }
        Ok(window)
    }

    /// Create a window with strictly positive extent on both axes.
    pub fn region(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ExtentError> {
        let window = Self::new(x_min, x_max, y_min, y_max)?;
        if window.width() <= 0.0 || window.height() <= 0.0 {
            return Err(ExtentError::InvalidRegion(format!(
                "region must have positive extent, got x=[{x_min}, {x_max}], y=[{y_min}, {y_max}]"
            )));
        }
        Ok(window)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.x0 + 0.5 * self.width(), self.y0 + 0.5 * self.height())
    }

    /// True if `other` lies inside `self` (edges included).
    pub fn contains(&self, other: &SearchWindow) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }
}

/// A valid grid sample next to an undefined one along a grid axis. The
/// boundary of the objective's domain crosses the segment between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainEdge {
    /// Last known point where the objective is defined.
    pub inside: (f64, f64),
    /// Objective value at `inside`.
    pub value: f64,
    /// Nearest known point where it is not.
    pub outside: (f64, f64),
}

impl DomainEdge {
    pub fn midpoint(&self) -> (f64, f64) {
        (
            self.inside.0 + 0.5 * (self.outside.0 - self.inside.0),
            self.inside.1 + 0.5 * (self.outside.1 - self.inside.1),
        )
    }

    /// True if the segment runs along the x axis.
    pub fn along_x(&self) -> bool {
        self.inside.1 == self.outside.1
    }

    pub fn length(&self) -> f64 {
        (self.outside.0 - self.inside.0).abs() + (self.outside.1 - self.inside.1).abs()
    }
}

/// `nx × ny` sample points spanning a window, edges included.
///
/// The x and y sample coordinates are kept as separate 1D arrays; 2D meshes
/// are laid out `(ny, nx)`, y outer.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    window: SearchWindow,
    xs: Array1<f64>,
    ys: Array1<f64>,
}

impl SampleGrid {
    /// `nx` and `ny` must be at least 2; the optimizer enforces at least 3.
    pub fn new(window: SearchWindow, nx: usize, ny: usize) -> Self {
        Self {
            window,
            xs: edge_inclusive_samples(window.x0, window.x1, nx),
            ys: edge_inclusive_samples(window.y0, window.y1, ny),
        }
    }

    pub fn xs(&self) -> &Array1<f64> {
        &self.xs
    }

    pub fn ys(&self) -> &Array1<f64> {
        &self.ys
    }

    /// Grid shape as `(ny, nx)`.
    pub fn dim(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    /// Expand into x and y meshes of shape `(ny, nx)`.
    pub fn mesh(&self) -> (Array2<f64>, Array2<f64>) {
        let dim = self.dim();
        let mx = Array2::from_shape_fn(dim, |(_, i)| self.xs[i]);
        let my = Array2::from_shape_fn(dim, |(j, _)| self.ys[j]);
        (mx, my)
    }

    /// Index `(i, j)` of the smallest non-NaN value, first in row-major order
    /// on ties. `None` if every value is NaN.
    pub fn argmin(&self, values: &Array2<f64>) -> Option<(usize, usize)> {
        let (ny, nx) = values.dim();
        let mut best: Option<((usize, usize), f64)> = None;
        for j in 0..ny {
            for i in 0..nx {
                let v = values[(j, i)];
                if v.is_nan() {
                    continue;
                }
                match best {
                    Some((_, b)) if v >= b => {}
                    _ => best = Some(((i, j), v)),
                }
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Distance between adjacent samples on each axis.
    pub fn spacing(&self) -> (f64, f64) {
        (self.xs[1] - self.xs[0], self.ys[1] - self.ys[0])
    }

    /// Every valid sample paired with each undefined 4-neighbour, in row-major
    /// order of the valid sample.
    pub fn domain_edges(&self, values: &Array2<f64>) -> Vec<DomainEdge> {
        let (ny, nx) = values.dim();
        let mut edges = Vec::new();
        for j in 0..ny {
            for i in 0..nx {
                let value = values[(j, i)];
                if value.is_nan() {
                    continue;
                }
                let neighbours = [
                    (i + 1 < nx).then_some((i + 1, j)),
                    i.checked_sub(1).map(|i| (i, j)),
                    (j + 1 < ny).then_some((i, j + 1)),
                    j.checked_sub(1).map(|j| (i, j)),
                ];
                for (ni, nj) in neighbours.into_iter().flatten() {
                    if values[(nj, ni)].is_nan() {
                        edges.push(DomainEdge {
                            inside: (self.xs[i], self.ys[j]),
                            value,
                            outside: (self.xs[ni], self.ys[nj]),
                        });
                    }
                }
            }
        }
        edges
    }

    /// Window of one sample spacing on every side of `(x, y)`, clamped to
    /// this grid's window.
    pub fn around(&self, x: f64, y: f64) -> SearchWindow {
        let (dx, dy) = self.spacing();
        SearchWindow {
            x0: (x - dx).max(self.window.x0),
            x1: (x + dx).min(self.window.x1),
            y0: (y - dy).max(self.window.y0),
            y1: (y + dy).min(self.window.y1),
        }
    }

    /// One-cell neighbourhood of sample `(i, j)`, clamped to this grid's window.
    pub fn neighbourhood(&self, i: usize, j: usize) -> SearchWindow {
        let nx = self.xs.len();
        let ny = self.ys.len();
        let (i0, i1) = (i.saturating_sub(1), (i + 1).min(nx - 1));
        let (j0, j1) = (j.saturating_sub(1), (j + 1).min(ny - 1));
        SearchWindow {
            x0: self.xs[i0].max(self.window.x0),
            x1: self.xs[i1].min(self.window.x1),
            y0: self.ys[j0].max(self.window.y0),
            y1: self.ys[j1].min(self.window.y1),
        }
    }
}

/// `n` evenly spaced samples from `lo` to `hi`; the last one is exactly `hi`.
fn edge_inclusive_samples(lo: f64, hi: f64, n: usize) -> Array1<f64> {
    let span = hi - lo;
    let last = n.saturating_sub(1).max(1) as f64;
    Array1::from_shape_fn(n, |k| {
        if k + 1 == n {
            hi
        } else {
            (lo + span * (k as f64 / last)).min(hi)
        }
    })
}
