//! Web Mercator (EPSG:3857, spherical).
//!
//!   forward: x = a·wrap(λ - λ₀), y = a·ln(tan(π/4 + φ/2))
//!   inverse: λ = λ₀ + x/a, φ = 2·atan(exp(y/a)) - π/2

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::{wrap_lon, Projection};

/// Maximum latitude for Web Mercator (≈85.0511°), where the projection
/// is bounded to a square.
pub const MAX_LAT_3857: f64 = 1.4844222297453324; // atan(sinh(π)) in radians

/// Web Mercator projection. Latitudes past ±85.0511° are outside the domain.
pub struct WebMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
}

impl WebMercator {
    /// Web Mercator with EPSG:3857 parameters.
    pub fn new() -> Self {
        Self::with_central_meridian(0.0)
    }

    /// Web Mercator centred on `lon0` (radians).
    pub fn with_central_meridian(lon0: f64) -> Self {
        Self {
            ellipsoid: WGS84,
            lon0,
        }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for WebMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || !(-MAX_LAT_3857..=MAX_LAT_3857).contains(&lat) {
            return Err(ProjError::OutOfDomain(lon, lat));
        }
        let x = self.ellipsoid.a * wrap_lon(lon - self.lon0);
        let y = self.ellipsoid.a * (FRAC_PI_4 + lat / 2.0).tan().ln();
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::OutOfDomain(x, y));
        }
        let lon = self.lon0 + x / self.ellipsoid.a;
        let lat = 2.0 * (y / self.ellipsoid.a).exp().atan() - FRAC_PI_2;
        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_web_mercator_origin() {
        let proj = WebMercator::new();
        let (x, y) = proj.forward(0.0, 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_web_mercator_roundtrip() {
        let proj = WebMercator::new();
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (10.0, 45.0),
            (-73.9857, 40.7484), // NYC
            (139.6917, 35.6895), // Tokyo
            (-180.0, 0.0),
        ];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-10);
            assert_relative_eq!(lat2, lat, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_web_mercator_epsg3857_reference() {
        // (-180°, 0°) → (-20037508.34, 0)
        let proj = WebMercator::new();
        let (x, _) = proj.forward(-PI, 0.0).unwrap();
        assert_relative_eq!(x, -20_037_508.342_789_244, epsilon = 0.01);
    }

    #[test]
    fn test_web_mercator_pole_out_of_domain() {
        let proj = WebMercator::new();
        assert!(matches!(
            proj.forward(0.0, FRAC_PI_2),
            Err(ProjError::OutOfDomain(_, _))
        ));
        let (_, y) = proj.forward(0.0, MAX_LAT_3857).unwrap();
        assert_relative_eq!(y, 20_037_508.342_789_244, epsilon = 0.01);
    }

    #[test]
    fn test_antimeridian_wrap() {
        // Centred on 180°: just either side of 0° lands at opposite edges
        let proj = WebMercator::with_central_meridian(PI);
        let (xw, _) = proj.forward((-0.1_f64).to_radians(), 0.0).unwrap();
        let (xe, _) = proj.forward(0.1_f64.to_radians(), 0.0).unwrap();
        assert!(xw > 19_000_000.0, "xw = {xw}");
        assert!(xe < -19_000_000.0, "xe = {xe}");
    }
}
