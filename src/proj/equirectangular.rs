//! Equirectangular (Plate Carrée) projection.
//!
//! forward: x = a·wrap(λ - λ₀)·cos(φ₁), y = a·φ
//! inverse: λ = λ₀ + x/(a·cos(φ₁)), φ = y/a

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::{wrap_lon, Projection};

pub struct Equirectangular {
    ellipsoid: Ellipsoid,
    lon0: f64,
    cos_lat_ts: f64,
}

impl Equirectangular {
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, lat_ts: f64) -> Self {
        Self {
            ellipsoid,
            lon0,
            cos_lat_ts: lat_ts.cos(),
        }
    }

    /// World Equidistant Cylindrical (EPSG:4087).
    pub fn epsg_4087() -> Self {
        Self::new(WGS84, 0.0, 0.0)
    }

    /// Plate Carrée on WGS84 centred on `lon0` (radians).
    pub fn plate_carree(lon0: f64) -> Self {
        Self::new(WGS84, lon0, 0.0)
    }
}

impl Projection for Equirectangular {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            return Err(ProjError::OutOfDomain(lon, lat));
        }
        let x = self.ellipsoid.a * wrap_lon(lon - self.lon0) * self.cos_lat_ts;
        let y = self.ellipsoid.a * lat;
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let lon = self.lon0 + x / (self.ellipsoid.a * self.cos_lat_ts);
        let lat = y / self.ellipsoid.a;
        if !lon.is_finite() || !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            return Err(ProjError::OutOfDomain(x, y));
        }
        Ok((lon, lat))
    }
}
