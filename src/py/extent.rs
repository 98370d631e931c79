//! PyO3 bindings for the extent solvers.

use std::ffi::CString;

use pyo3::exceptions::{PyRuntimeWarning, PyValueError};
use pyo3::prelude::*;

use crate::error::ExtentError;
use crate::extent::{self, ExtentSolver};
use crate::proj::pipeline::Pipeline;
use crate::search::SearchConfig;

/// Bounding box in `dst_crs` of a rectangle given in `src_crs`.
///
/// Args:
///     src_crs: Source CRS string (e.g. "EPSG:4326").
///     bounds: Source rectangle as (x_min, x_max, y_min, y_max).
///     dst_crs: Destination CRS string.
///     sample_resolution: Grid samples per axis (nx, ny), each at least 3.
///     tolerance: Convergence tolerance relative to the source rectangle size.
///     max_iterations: Bound on grid refinements per search.
///
/// Returns:
///     (x_min, x_max, y_min, y_max) in the destination CRS. A RuntimeWarning
///     is raised when any bound is an unconverged estimate.
#[pyfunction]
#[pyo3(signature = (src_crs, bounds, dst_crs, sample_resolution=(77, 77), tolerance=1e-9, max_iterations=50))]
pub fn projected_extent(
    py: Python<'_>,
    src_crs: &str,
    bounds: (f64, f64, f64, f64),
    dst_crs: &str,
    sample_resolution: (usize, usize),
    tolerance: f64,
    max_iterations: usize,
) -> PyResult<(f64, f64, f64, f64)> {
    let (nx, ny) = sample_resolution;
    let config = SearchConfig::default()
        .with_samples(nx, ny)
        .with_tolerance(tolerance)
        .with_max_iterations(max_iterations);

    // Copy strings to owned before releasing GIL
    let src_crs = src_crs.to_string();
    let dst_crs = dst_crs.to_string();

    let result = py
        .allow_threads(move || -> Result<_, ExtentError> {
            let solver = ExtentSolver::new(config)?;
            let pipeline = Pipeline::new(&src_crs, &dst_crs)?;
            solver.solve(&pipeline, bounds)
        })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    if !result.is_exact() {
        let detail: Vec<String> = result.non_converged.iter().map(|nc| nc.to_string()).collect();
        let msg = CString::new(format!("approximate extent: {}", detail.join("; ")))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        PyErr::warn(py, py.get_type::<PyRuntimeWarning>().as_any(), &msg, 1)?;
    }

    Ok(result.as_tuple())
}

/// Bounding box of the densified outline of a rectangle.
///
/// Faster than `projected_extent` but misses extrema inside the rectangle.
#[pyfunction]
#[pyo3(signature = (src_crs, bounds, dst_crs, pts_per_edge=21))]
pub fn boundary_extent(
    py: Python<'_>,
    src_crs: &str,
    bounds: (f64, f64, f64, f64),
    dst_crs: &str,
    pts_per_edge: usize,
) -> PyResult<(f64, f64, f64, f64)> {
    let src_crs = src_crs.to_string();
    let dst_crs = dst_crs.to_string();

    let result = py
        .allow_threads(move || -> Result<_, ExtentError> {
            let pipeline = Pipeline::new(&src_crs, &dst_crs)?;
            extent::boundary_extent(&pipeline, bounds, pts_per_edge)
        })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(result.as_tuple())
}
