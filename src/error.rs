use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtentError {
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Unprojectable region: no valid target coordinates in x=[{x0}, {x1}], y=[{y0}, {y1}]")]
    UnprojectableRegion { x0: f64, x1: f64, y0: f64, y1: f64 },

    #[error("Objective returned shape {found:?}, expected {expected:?}")]
    ObjectiveShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Inverted extent on {axis} axis: min {min} > max {max}")]
    InvertedExtent { axis: char, min: f64, max: f64 },

    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),
}

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Point outside projection domain: ({0}, {1})")]
    OutOfDomain(f64, f64),
}
