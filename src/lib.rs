pub mod affine;
pub mod error;
pub mod extent;
pub mod proj;
pub mod search;
pub mod transform;
#[cfg(feature = "python")]
mod py;

pub use extent::{projected_extent, Bounds, ExtentResult, ExtentSolver, Extremum};
pub use search::{GridSearch, SearchConfig, SearchWindow};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
