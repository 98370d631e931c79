//! PyO3 binding for evaluating a CRS transform over numpy arrays.

use ndarray::{Array2, ArrayD, ArrayViewD, IxDyn};
use numpy::{PyArrayDyn, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::ExtentError;
use crate::proj::pipeline::Pipeline;
use crate::transform::TransformEvaluator;

/// Transform coordinate arrays of any shape from one CRS to another.
///
/// Args:
///     x: Array of x coordinates (longitude or easting).
///     y: Array of y coordinates, same shape as `x`.
///     src_crs: Source CRS string (e.g. "EPSG:4326").
///     dst_crs: Destination CRS string (e.g. "EPSG:3857").
///
/// Returns:
///     Tuple of (x_out, y_out) arrays shaped like the inputs. Points outside
///     the destination's domain are NaN.
#[pyfunction]
#[pyo3(signature = (x, y, src_crs, dst_crs))]
#[allow(clippy::type_complexity)]
pub fn transform_points<'py>(
    py: Python<'py>,
    x: PyReadonlyArrayDyn<'py, f64>,
    y: PyReadonlyArrayDyn<'py, f64>,
    src_crs: &str,
    dst_crs: &str,
) -> PyResult<(Bound<'py, PyArrayDyn<f64>>, Bound<'py, PyArrayDyn<f64>>)> {
    let (x_view, y_view) = (x.as_array(), y.as_array());
    let shape = x_view.shape().to_vec();
    if y_view.shape() != shape.as_slice() {
        return Err(PyValueError::new_err(format!(
            "x and y must have the same shape, got {:?} and {:?}",
            shape,
            y_view.shape()
        )));
    }

    // The evaluator works on 2D meshes; a single row holds any input
    let n = x_view.len();
    let as_row = |a: &ArrayViewD<'_, f64>| {
        Array2::from_shape_vec((1, n), a.iter().copied().collect())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    };
    let xs = as_row(&x_view)?;
    let ys = as_row(&y_view)?;

    let src_crs = src_crs.to_string();
    let dst_crs = dst_crs.to_string();
    let (tx, ty) = py
        .allow_threads(move || -> Result<_, ExtentError> {
            let pipeline = Pipeline::new(&src_crs, &dst_crs)?;
            Ok(TransformEvaluator::new(&pipeline).evaluate(&xs, &ys)?)
        })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let reshape = |a: Array2<f64>| -> PyResult<ArrayD<f64>> {
        a.into_shape_with_order(IxDyn(&shape))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    };
    Ok((
        PyArrayDyn::from_owned_array(py, reshape(tx)?),
        PyArrayDyn::from_owned_array(py, reshape(ty)?),
    ))
}
