use pyo3::prelude::*;

mod extent;
mod transform;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(extent::projected_extent, m)?)?;
    m.add_function(wrap_pyfunction!(extent::boundary_extent, m)?)?;
    m.add_function(wrap_pyfunction!(transform::transform_points, m)?)?;
    Ok(())
}
