pub mod crs;
pub mod ellipsoid;
pub mod equirectangular;
pub mod mercator;
pub mod pipeline;

use std::f64::consts::{PI, TAU};

use crate::error::ProjError;

/// Trait for map projections supporting forward and inverse transforms.
pub trait Projection: Send + Sync {
    /// Forward: (lon_rad, lat_rad) -> (easting, northing)
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError>;

    /// Inverse: (easting, northing) -> (lon_rad, lat_rad)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError>;
}

/// Wrap a longitude difference into [-π, π).
///
/// This is where the antimeridian discontinuity of cylindrical projections
/// comes from.
pub fn wrap_lon(dlon: f64) -> f64 {
    let wrapped = (dlon + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
